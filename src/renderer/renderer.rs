use std::sync::Arc;

use glam::Mat4;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::settings::RenderSettings;

use super::context::GpuContext;
use super::forward::ForwardPipeline;
use super::lights::Light;
use super::mesh::Mesh;
use super::shadow::ShadowTarget;
use super::uniforms::{Globals, ShadowUniform};

/// Everything one frame needs, recomputed each tick and threaded by
/// reference through the render call. The light-space matrix is derived
/// from `light` alone, never from the camera.
pub struct FrameState {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub light: Light,
}

/// Owns the GPU context and both passes; per frame it runs the shadow pass
/// from the light's viewpoint, then the lit pass from the camera's, then
/// presents.
pub struct Renderer {
    context: GpuContext,
    shadow: ShadowTarget,
    forward: ForwardPipeline,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, settings: &RenderSettings) -> Self {
        let context = GpuContext::new(window, settings).await;
        let shadow = ShadowTarget::new(&context.device, settings.shadow_map_size);
        let forward = ForwardPipeline::new(&context.device, context.config.format, shadow.read_layout());

        Self {
            context,
            shadow,
            forward,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.context.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.context.queue
    }

    pub fn material_layout(&self) -> &wgpu::BindGroupLayout {
        self.forward.material_layout()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
    }

    /// Run both passes for one frame and present it.
    pub fn render(&mut self, frame: &FrameState, mesh: &Mesh) {
        let surface_texture = match self.context.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // The next configure restores the swapchain; skip this frame
                self.context.resize(self.context.size);
                return;
            }
            Err(err) => {
                log::error!("Failed to acquire frame: {}", err);
                return;
            }
        };
        let color_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let light_view_proj = frame.light.view_proj();
        let shadow_uniform = ShadowUniform::new(light_view_proj, frame.model);
        let globals = Globals::new(frame.view_proj, frame.model, light_view_proj);
        let light_uniform = frame.light.to_uniform();

        self.forward
            .upload(&self.context.queue, &globals, &light_uniform);

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("FrameEncoder"),
            });

        self.shadow
            .render(&self.context.queue, &mut encoder, &shadow_uniform, mesh);
        self.forward.render(
            &mut encoder,
            &color_view,
            &self.context.depth.view,
            self.shadow.read_bind_group(),
            mesh,
        );

        self.context.queue.submit(Some(encoder.finish()));
        surface_texture.present();
    }
}
