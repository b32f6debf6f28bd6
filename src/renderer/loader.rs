use std::fmt;
use std::path::{Path, PathBuf};

use super::geometry;
use super::vertex::Vertex;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Image(String),
    Gltf(gltf::Error),
    InvalidGeometry(String),
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<gltf::Error> for LoadError {
    fn from(e: gltf::Error) -> Self {
        LoadError::Gltf(e)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Image(e) => write!(f, "Image error: {}", e),
            LoadError::Gltf(e) => write!(f, "glTF error: {}", e),
            LoadError::InvalidGeometry(e) => write!(f, "Invalid geometry: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

/// One primitive's CPU-side geometry, ready for upload.
#[derive(Debug)]
pub struct SubmeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub material_index: usize,
}

/// Per-material texture association. `diffuse_texture` is `None` when the
/// material has no base-color texture slot; such materials resolve to the
/// flat fallback texture at upload time.
#[derive(Debug)]
pub struct MaterialData {
    pub diffuse_texture: Option<PathBuf>,
}

/// A glTF scene reduced to flat submesh records plus its material table.
/// Submeshes appear in document primitive order; the last material entry is
/// the implicit default for primitives without a material.
#[derive(Debug)]
pub struct MeshData {
    pub submeshes: Vec<SubmeshData>,
    pub materials: Vec<MaterialData>,
}

impl MeshData {
    pub fn from_gltf(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        log::info!("Importing mesh: {:?}", path);

        let (document, buffers, _images) = gltf::import(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let mut materials: Vec<MaterialData> = document
            .materials()
            .map(|material| MaterialData {
                diffuse_texture: diffuse_texture_path(&material, base_dir),
            })
            .collect();

        // Implicit default material for primitives that reference none
        let default_material = materials.len();
        materials.push(MaterialData {
            diffuse_texture: None,
        });

        let mut submeshes = Vec::new();
        for mesh in document.meshes() {
            for primitive in mesh.primitives() {
                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    log::warn!(
                        "Skipping non-triangle primitive (mode {:?}) in {:?}",
                        primitive.mode(),
                        path
                    );
                    continue;
                }

                let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()].0));

                let positions: Vec<[f32; 3]> = reader
                    .read_positions()
                    .ok_or_else(|| {
                        LoadError::InvalidGeometry(format!(
                            "primitive without positions in {:?}",
                            path
                        ))
                    })?
                    .collect();

                let normals: Option<Vec<[f32; 3]>> =
                    reader.read_normals().map(|iter| iter.collect());
                let uvs: Option<Vec<[f32; 2]>> = reader
                    .read_tex_coords(0)
                    .map(|coords| coords.into_f32().collect());

                let mut vertices: Vec<Vertex> = positions
                    .iter()
                    .enumerate()
                    .map(|(i, &pos)| Vertex {
                        pos,
                        uv: uvs
                            .as_ref()
                            .and_then(|uv| uv.get(i).copied())
                            .unwrap_or([0.0, 0.0]),
                        normal: normals
                            .as_ref()
                            .and_then(|n| n.get(i).copied())
                            .unwrap_or([0.0, 0.0, 0.0]),
                    })
                    .collect();

                let mut indices: Vec<u32> = match reader.read_indices() {
                    Some(indices) => indices.into_u32().collect(),
                    None => {
                        // Unindexed primitive: weld identical vertices
                        let (welded, generated) = geometry::weld_vertices(&vertices);
                        vertices = welded;
                        generated
                    }
                };

                if indices.len() % 3 != 0 {
                    log::warn!(
                        "Index count {} is not a triangle multiple in {:?} - truncating",
                        indices.len(),
                        path
                    );
                    indices.truncate(indices.len() / 3 * 3);
                }

                validate_indices(vertices.len(), &indices)?;

                if normals.is_none() {
                    geometry::generate_normals(&mut vertices, &indices);
                }

                let material_index = primitive
                    .material()
                    .index()
                    .unwrap_or(default_material);

                submeshes.push(SubmeshData {
                    vertices,
                    indices,
                    material_index,
                });
            }
        }

        if submeshes.is_empty() {
            return Err(LoadError::InvalidGeometry(format!(
                "no triangle primitives in {:?}",
                path
            )));
        }

        log::info!(
            "Imported {} submeshes, {} materials from {:?}",
            submeshes.len(),
            materials.len(),
            path
        );

        Ok(Self {
            submeshes,
            materials,
        })
    }
}

/// Every index must address a vertex of its own submesh.
fn validate_indices(vertex_count: usize, indices: &[u32]) -> Result<(), LoadError> {
    match indices.iter().find(|&&i| i as usize >= vertex_count) {
        Some(&bad) => Err(LoadError::InvalidGeometry(format!(
            "index {} out of bounds for {} vertices",
            bad, vertex_count
        ))),
        None => Ok(()),
    }
}

fn diffuse_texture_path(material: &gltf::Material<'_>, base_dir: &Path) -> Option<PathBuf> {
    let info = material.pbr_metallic_roughness().base_color_texture()?;
    match info.texture().source().source() {
        gltf::image::Source::Uri { uri, .. } => Some(base_dir.join(uri)),
        gltf::image::Source::View { .. } => {
            log::warn!(
                "Material {:?} uses an embedded texture, which is not supported - using fallback",
                material.name()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_indices_pass_validation() {
        assert!(validate_indices(3, &[0, 1, 2]).is_ok());
    }

    #[test]
    fn out_of_bounds_index_is_invalid_geometry() {
        let err = validate_indices(3, &[0, 1, 3]).unwrap_err();
        assert!(matches!(err, LoadError::InvalidGeometry(_)));
    }

    #[test]
    fn missing_file_reports_an_error_value() {
        let err = MeshData::from_gltf("no/such/scene.gltf").unwrap_err();
        // gltf reports the missing file through its own error type
        assert!(matches!(err, LoadError::Gltf(_) | LoadError::Io(_)));
    }

    #[test]
    fn load_error_display_is_prefixed_by_kind() {
        let err = LoadError::InvalidGeometry("bad".into());
        assert_eq!(err.to_string(), "Invalid geometry: bad");
        let err = LoadError::Image("decode".into());
        assert_eq!(err.to_string(), "Image error: decode");
    }
}
