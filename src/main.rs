mod demo;

use demo::Viewer;

// Scene selection: a glTF path, or None for the built-in cube
const MESH_PATH: Option<&str> = None;

fn main() {
    if let Err(err) = shadowbox::run(Viewer::new(MESH_PATH)) {
        eprintln!("Application error: {err}");
    }
}
