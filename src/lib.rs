pub mod app;
pub mod camera;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod transform;

use app::{App, TickHandler};
use settings::RenderSettings;
use winit::event_loop::EventLoop;

fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

/// Create the event loop and drive `handler` until the window closes.
pub fn run<H: TickHandler + 'static>(handler: H) -> Result<(), winit::error::EventLoopError> {
    init_logging();

    let settings = RenderSettings::load();
    log::info!("Starting shadowbox renderer");

    let event_loop = EventLoop::new()?;
    let mut app = App::new(handler, settings);

    let result = event_loop.run_app(&mut app);

    if let Err(ref err) = result {
        log::error!("Application error: {}", err);
    }

    log::info!("Shutdown complete");

    result
}
