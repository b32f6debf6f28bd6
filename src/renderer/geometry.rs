use glam::Vec3;
use std::collections::HashMap;

use super::vertex::{v, Vertex};

/// Unit cube centered on the origin, four vertices per face so each face
/// keeps its own normal and UV quad.
pub fn cube_mesh() -> (Vec<Vertex>, Vec<u32>) {
    let p = |x, y, z| [x, y, z];

    let verts = vec![
        // Right face (+X)
        v(p(0.5, -0.5, -0.5), [0.0, 1.0], [1.0, 0.0, 0.0]),
        v(p(0.5, 0.5, -0.5), [0.0, 0.0], [1.0, 0.0, 0.0]),
        v(p(0.5, 0.5, 0.5), [1.0, 0.0], [1.0, 0.0, 0.0]),
        v(p(0.5, -0.5, 0.5), [1.0, 1.0], [1.0, 0.0, 0.0]),
        // Left face (-X)
        v(p(-0.5, -0.5, 0.5), [0.0, 1.0], [-1.0, 0.0, 0.0]),
        v(p(-0.5, 0.5, 0.5), [0.0, 0.0], [-1.0, 0.0, 0.0]),
        v(p(-0.5, 0.5, -0.5), [1.0, 0.0], [-1.0, 0.0, 0.0]),
        v(p(-0.5, -0.5, -0.5), [1.0, 1.0], [-1.0, 0.0, 0.0]),
        // Top face (+Y)
        v(p(-0.5, 0.5, -0.5), [0.0, 1.0], [0.0, 1.0, 0.0]),
        v(p(-0.5, 0.5, 0.5), [0.0, 0.0], [0.0, 1.0, 0.0]),
        v(p(0.5, 0.5, 0.5), [1.0, 0.0], [0.0, 1.0, 0.0]),
        v(p(0.5, 0.5, -0.5), [1.0, 1.0], [0.0, 1.0, 0.0]),
        // Bottom face (-Y)
        v(p(-0.5, -0.5, 0.5), [0.0, 1.0], [0.0, -1.0, 0.0]),
        v(p(-0.5, -0.5, -0.5), [0.0, 0.0], [0.0, -1.0, 0.0]),
        v(p(0.5, -0.5, -0.5), [1.0, 0.0], [0.0, -1.0, 0.0]),
        v(p(0.5, -0.5, 0.5), [1.0, 1.0], [0.0, -1.0, 0.0]),
        // Front face (+Z)
        v(p(0.5, -0.5, 0.5), [0.0, 1.0], [0.0, 0.0, 1.0]),
        v(p(0.5, 0.5, 0.5), [0.0, 0.0], [0.0, 0.0, 1.0]),
        v(p(-0.5, 0.5, 0.5), [1.0, 0.0], [0.0, 0.0, 1.0]),
        v(p(-0.5, -0.5, 0.5), [1.0, 1.0], [0.0, 0.0, 1.0]),
        // Back face (-Z)
        v(p(-0.5, -0.5, -0.5), [0.0, 1.0], [0.0, 0.0, -1.0]),
        v(p(-0.5, 0.5, -0.5), [0.0, 0.0], [0.0, 0.0, -1.0]),
        v(p(0.5, 0.5, -0.5), [1.0, 0.0], [0.0, 0.0, -1.0]),
        v(p(0.5, -0.5, -0.5), [1.0, 1.0], [0.0, 0.0, -1.0]),
    ];

    let mut indices = Vec::with_capacity(36);
    for face in 0..6u32 {
        let base = face * 4;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (verts, indices)
}

/// Recompute smooth per-vertex normals from the triangle list.
///
/// Every triangle contributes its face normal (cross product of the two edges
/// leaving the first vertex) to each of its three vertices; the accumulated
/// sums are re-normalized at the end. Vertices not referenced by any triangle
/// keep a zero normal.
pub fn generate_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for vertex in vertices.iter_mut() {
        vertex.normal = [0.0; 3];
    }

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let p0 = Vec3::from(vertices[i0].pos);
        let p1 = Vec3::from(vertices[i1].pos);
        let p2 = Vec3::from(vertices[i2].pos);

        let face_normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();

        for &index in &[i0, i1, i2] {
            let n = Vec3::from(vertices[index].normal) + face_normal;
            vertices[index].normal = n.to_array();
        }
    }

    for vertex in vertices.iter_mut() {
        vertex.normal = Vec3::from(vertex.normal).normalize_or_zero().to_array();
    }
}

/// Weld identical vertices of an unindexed triangle list into a unique vertex
/// array plus an index buffer referencing it.
///
/// Equality is bit-exact on all attributes, so welding never merges vertices
/// that differ only in UV or normal.
pub fn weld_vertices(vertices: &[Vertex]) -> (Vec<Vertex>, Vec<u32>) {
    let mut unique: Vec<Vertex> = Vec::new();
    let mut indices = Vec::with_capacity(vertices.len());
    let mut seen: HashMap<[u8; std::mem::size_of::<Vertex>()], u32> = HashMap::new();

    for vertex in vertices {
        let key: [u8; std::mem::size_of::<Vertex>()] =
            bytemuck::bytes_of(vertex).try_into().unwrap();
        let index = *seen.entry(key).or_insert_with(|| {
            unique.push(*vertex);
            (unique.len() - 1) as u32
        });
        indices.push(index);
    }

    (unique, indices)
}
