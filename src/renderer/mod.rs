pub mod context;
pub mod forward;
pub mod geometry;
pub mod lights;
pub mod loader;
pub mod mesh;
pub mod renderer;
pub mod shadow;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub use lights::{DirectionalLight, Light, SpotLight};
pub use loader::{LoadError, MeshData};
pub use mesh::Mesh;
pub use renderer::{FrameState, Renderer};
pub use texture::Texture;
pub use vertex::Vertex;
