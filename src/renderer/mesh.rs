use std::path::Path;
use wgpu::util::DeviceExt;

use super::loader::{LoadError, MeshData};
use super::texture::Texture;
use super::vertex::Vertex;

/// One vertex/index buffer pair sharing a single material. Buffers are
/// created once at load time and never resized.
pub struct Submesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material_index: usize,
}

impl Submesh {
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn material_index(&self) -> usize {
        self.material_index
    }
}

struct MaterialSlot {
    _texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// A renderable scene: submeshes in load order plus the material texture
/// table they index into.
pub struct Mesh {
    submeshes: Vec<Submesh>,
    materials: Vec<MaterialSlot>,
}

impl Mesh {
    /// Import a glTF scene and upload every triangle primitive as one
    /// submesh. Materials resolve to their base-color texture, or to the
    /// flat-white fallback when the slot is empty or the image fails to
    /// load.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        material_layout: &wgpu::BindGroupLayout,
        path: impl AsRef<Path>,
    ) -> Result<Self, LoadError> {
        let data = MeshData::from_gltf(path)?;
        Ok(Self::upload(device, queue, material_layout, &data))
    }

    /// Upload already-imported mesh data. Kept separate from [`Mesh::load`]
    /// so procedurally built scenes (the cube fallback) take the same path.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        material_layout: &wgpu::BindGroupLayout,
        data: &MeshData,
    ) -> Self {
        let materials = data
            .materials
            .iter()
            .enumerate()
            .map(|(index, material)| {
                let texture = match &material.diffuse_texture {
                    Some(path) => match Texture::from_path(device, queue, path) {
                        Ok(texture) => texture,
                        Err(err) => {
                            log::warn!(
                                "Material {}: {} - substituting fallback texture",
                                index,
                                err
                            );
                            Texture::white(device, queue)
                        }
                    },
                    None => Texture::white(device, queue),
                };
                let bind_group = texture.bind_group(device, material_layout);
                MaterialSlot {
                    _texture: texture,
                    bind_group,
                }
            })
            .collect();

        let submeshes = data
            .submeshes
            .iter()
            .map(|submesh| Self::upload_submesh(
                device,
                &submesh.vertices,
                &submesh.indices,
                submesh.material_index,
            ))
            .collect();

        Self {
            submeshes,
            materials,
        }
    }

    /// Build a single-submesh scene from raw geometry with the fallback
    /// texture as its material.
    pub fn from_vertices(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        material_layout: &wgpu::BindGroupLayout,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Self {
        let texture = Texture::white(device, queue);
        let bind_group = texture.bind_group(device, material_layout);
        Self {
            submeshes: vec![Self::upload_submesh(device, vertices, indices, 0)],
            materials: vec![MaterialSlot {
                _texture: texture,
                bind_group,
            }],
        }
    }

    fn upload_submesh(
        device: &wgpu::Device,
        vertices: &[Vertex],
        indices: &[u32],
        material_index: usize,
    ) -> Submesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("VertexBuffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("IndexBuffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Submesh {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            material_index,
        }
    }

    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    /// Issue one indexed draw per submesh in load order. When
    /// `material_slot` is set, each submesh's texture bind group is bound
    /// there first; the depth-only shadow pass passes `None`.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, material_slot: Option<u32>) {
        for submesh in &self.submeshes {
            if let Some(slot) = material_slot {
                let material = self
                    .materials
                    .get(submesh.material_index)
                    .unwrap_or_else(|| {
                        // load-time validation keeps this unreachable; last
                        // entry is the implicit default material
                        &self.materials[self.materials.len() - 1]
                    });
                pass.set_bind_group(slot, &material.bind_group, &[]);
            }
            pass.set_vertex_buffer(0, submesh.vertex_buffer.slice(..));
            pass.set_index_buffer(submesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..submesh.index_count, 0, 0..1);
        }
    }
}
