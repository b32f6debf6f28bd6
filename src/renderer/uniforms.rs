use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-frame globals for the lit pass: camera view-projection, the model
/// matrix for world-space position/normal reconstruction, and the light's
/// view-projection for shadow lookup.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
}

impl Globals {
    pub fn new(view_proj: Mat4, model: Mat4, light_view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            light_view_proj: light_view_proj.to_cols_array_2d(),
        }
    }
}

impl Default for Globals {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// Uniform for the depth-only shadow pass: the composite light-space MVP.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct ShadowUniform {
    pub mvp: [[f32; 4]; 4],
}

impl ShadowUniform {
    pub fn new(light_view_proj: Mat4, model: Mat4) -> Self {
        Self {
            mvp: (light_view_proj * model).to_cols_array_2d(),
        }
    }
}
