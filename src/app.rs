use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::input::InputState;
use crate::renderer::{LoadError, Renderer};
use crate::settings::RenderSettings;

/// Per-tick interface the host loop drives. The winit shell is the
/// collaborator; scenes implement this and never touch the event loop.
pub trait TickHandler {
    /// Called once after the renderer exists. A returned error aborts
    /// startup.
    fn setup(
        &mut self,
        renderer: &mut Renderer,
        settings: &RenderSettings,
    ) -> Result<(), LoadError>;

    fn on_resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Consume the input snapshot and advance scene state by `dt` seconds.
    fn on_update(&mut self, dt: f32, input: &InputState);

    /// Record and present one frame.
    fn on_render(&mut self, renderer: &mut Renderer);
}

/// Winit shell: owns the window, the renderer and the input snapshot, and
/// drives a [`TickHandler`] once per redraw.
pub struct App<H: TickHandler> {
    handler: H,
    settings: RenderSettings,
    renderer: Option<Renderer>,
    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    input: InputState,
    last_tick: Instant,
}

impl<H: TickHandler> App<H> {
    pub fn new(handler: H, settings: RenderSettings) -> Self {
        Self {
            handler,
            settings,
            renderer: None,
            window: None,
            window_id: None,
            input: InputState::new(),
            last_tick: Instant::now(),
        }
    }
}

impl<H: TickHandler> ApplicationHandler for App<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("shadowbox")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.settings.resolution.width,
                self.settings.resolution.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("create window"),
        );
        let id = window.id();

        let mut renderer = pollster::block_on(Renderer::new(window.clone(), &self.settings));
        if let Err(err) = self.handler.setup(&mut renderer, &self.settings) {
            log::error!("Scene setup failed: {}", err);
            event_loop.exit();
            return;
        }

        self.last_tick = Instant::now();
        window.request_redraw();

        self.window = Some(window);
        self.window_id = Some(id);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if Some(id) != self.window_id {
            return;
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                renderer.resize(size);
                self.handler.on_resize(size.width, size.height);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    renderer.resize(size);
                    self.handler.on_resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape && state == ElementState::Pressed {
                    event_loop.exit();
                    return;
                }
                self.input.set_key(code, state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.cursor_moved(position.x, position.y);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_tick).as_secs_f32();
                self.last_tick = now;

                self.handler.on_update(dt, &self.input);
                self.input.end_tick();
                self.handler.on_render(renderer);

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
