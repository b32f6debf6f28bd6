use glam::{Mat4, Vec3};
use winit::keyboard::KeyCode;

use shadowbox::app::TickHandler;
use shadowbox::camera::Camera;
use shadowbox::input::InputState;
use shadowbox::renderer::{
    geometry, DirectionalLight, FrameState, Light, LoadError, Mesh, Renderer, SpotLight,
};
use shadowbox::settings::RenderSettings;
use shadowbox::transform::Transform;

const FOV_Y: f32 = 1.3;
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

/// Units moved per second while a movement key is held.
const MOVE_RATE: f32 = 6.0;

/// Free-look viewer scene: one mesh, one light, WASD/QE movement and
/// mouse-look. The L key switches between the directional and spot light.
pub struct Viewer {
    mesh_path: Option<&'static str>,
    mesh: Option<Mesh>,
    camera: Camera,
    transform: Transform,
    light: Light,
    spot_mode: bool,
    aspect: f32,
    light_key_held: bool,
}

impl Viewer {
    pub fn new(mesh_path: Option<&'static str>) -> Self {
        // Start behind the object, looking down -Z toward it
        let camera = Camera::new(Vec3::ZERO, std::f32::consts::PI);

        Self {
            mesh_path,
            mesh: None,
            camera,
            transform: Transform::new(0.5, Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0)),
            light: Light::Directional(DirectionalLight {
                direction: Vec3::new(0.4, -1.0, 0.2).normalize(),
                ..Default::default()
            }),
            spot_mode: false,
            aspect: 1.0,
            light_key_held: false,
        }
    }

    fn toggle_light(&mut self) {
        self.spot_mode = !self.spot_mode;
        self.light = if self.spot_mode {
            Light::Spot(SpotLight {
                position: Vec3::new(0.0, 4.0, -3.0),
                direction: Vec3::new(0.0, -1.0, 0.0),
                ..Default::default()
            })
        } else {
            Light::Directional(DirectionalLight {
                direction: Vec3::new(0.4, -1.0, 0.2).normalize(),
                ..Default::default()
            })
        };
        log::info!(
            "Switched to {} light",
            if self.spot_mode { "spot" } else { "directional" }
        );
    }
}

impl TickHandler for Viewer {
    fn setup(
        &mut self,
        renderer: &mut Renderer,
        settings: &RenderSettings,
    ) -> Result<(), LoadError> {
        self.camera.move_speed = settings.move_speed;
        self.camera.sensitivity = settings.mouse_sensitivity;
        self.aspect = renderer.aspect_ratio();

        let mesh = match self.mesh_path {
            // A missing scene file is fatal; the caller aborts startup
            Some(path) => Mesh::load(
                renderer.device(),
                renderer.queue(),
                renderer.material_layout(),
                path,
            )?,
            None => {
                let (vertices, indices) = geometry::cube_mesh();
                Mesh::from_vertices(
                    renderer.device(),
                    renderer.queue(),
                    renderer.material_layout(),
                    &vertices,
                    &indices,
                )
            }
        };
        self.mesh = Some(mesh);
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    fn on_update(&mut self, dt: f32, input: &InputState) {
        let step = MOVE_RATE * dt;
        if input.is_down(KeyCode::KeyW) {
            self.camera.move_by(0.0, step, 0.0);
        }
        if input.is_down(KeyCode::KeyS) {
            self.camera.move_by(0.0, -step, 0.0);
        }
        if input.is_down(KeyCode::KeyA) {
            self.camera.move_by(-step, 0.0, 0.0);
        }
        if input.is_down(KeyCode::KeyD) {
            self.camera.move_by(step, 0.0, 0.0);
        }
        if input.is_down(KeyCode::KeyQ) {
            self.camera.move_by(0.0, 0.0, step);
        }
        if input.is_down(KeyCode::KeyE) {
            self.camera.move_by(0.0, 0.0, -step);
        }

        let (mdx, mdy) = input.mouse_delta();
        if mdx != 0.0 || mdy != 0.0 {
            // Screen-down drag looks down
            self.camera.rotate(-mdx, -mdy);
        }

        // Edge-trigger the light toggle so holding L does not flicker
        let light_key = input.is_down(KeyCode::KeyL);
        if light_key && !self.light_key_held {
            self.toggle_light();
        }
        self.light_key_held = light_key;
    }

    fn on_render(&mut self, renderer: &mut Renderer) {
        let Some(mesh) = &self.mesh else {
            return;
        };

        // Matrices are rebuilt from scratch every frame
        let projection = Mat4::perspective_rh(FOV_Y, self.aspect, NEAR, FAR);
        let frame = FrameState {
            view_proj: projection * self.camera.view(),
            model: self.transform.matrix(),
            light: self.light,
        };

        renderer.render(&frame, mesh);
    }
}
