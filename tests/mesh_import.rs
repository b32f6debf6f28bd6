//! Imports a small in-memory glTF document (written to a temp file with an
//! embedded data-URI buffer) and checks the submesh records that come out.

use glam::Vec3;
use shadowbox::renderer::MeshData;

/// Two-primitive scene: an indexed triangle with a (textureless) material,
/// and an unindexed quad with no material at all. Neither primitive has
/// authored normals.
fn write_test_gltf() -> std::path::PathBuf {
    let mut bytes: Vec<u8> = Vec::new();

    // Primitive 0: indexed triangle in the XY plane
    let tri: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    // Primitive 1: unindexed quad in the XZ plane, two triangles sharing an
    // edge so welding has duplicates to collapse
    let quad: [[f32; 3]; 6] = [
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
    ];
    for v in tri.iter().chain(quad.iter()) {
        for c in v {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bytes.extend_from_slice(&i.to_le_bytes());
    }

    let json = format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "buffers": [{{ "uri": "data:application/octet-stream;base64,{b64}", "byteLength": {len} }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 72, "target": 34962 }},
    {{ "buffer": 0, "byteOffset": 108, "byteLength": 6, "target": 34963 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5126, "count": 6, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 0.0, 1.0] }},
    {{ "bufferView": 2, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ],
  "materials": [{{ "name": "flat", "pbrMetallicRoughness": {{}} }}],
  "meshes": [{{ "primitives": [
    {{ "attributes": {{ "POSITION": 0 }}, "indices": 2, "material": 0 }},
    {{ "attributes": {{ "POSITION": 1 }} }}
  ] }}]
}}"#,
        b64 = base64::encode(&bytes),
        len = bytes.len()
    );

    let path = std::env::temp_dir().join("shadowbox-import-test.gltf");
    std::fs::write(&path, json).expect("write test gltf");
    path
}

#[test]
fn two_primitives_become_two_submeshes_in_order() {
    let path = write_test_gltf();
    let data = MeshData::from_gltf(&path).expect("import");

    assert_eq!(data.submeshes.len(), 2);
    // One authored material plus the implicit default
    assert_eq!(data.materials.len(), 2);

    // First primitive keeps its material; the second falls back to the
    // default slot
    assert_eq!(data.submeshes[0].material_index, 0);
    assert_eq!(data.submeshes[1].material_index, 1);
    assert!(data.materials[0].diffuse_texture.is_none());
    assert!(data.materials[1].diffuse_texture.is_none());
}

#[test]
fn indexed_triangle_arrives_as_authored() {
    let path = write_test_gltf();
    let data = MeshData::from_gltf(&path).expect("import");

    let tri = &data.submeshes[0];
    assert_eq!(tri.vertices.len(), 3);
    assert_eq!(tri.indices, vec![0, 1, 2]);
}

#[test]
fn unindexed_quad_is_welded() {
    let path = write_test_gltf();
    let data = MeshData::from_gltf(&path).expect("import");

    let quad = &data.submeshes[1];
    // Six unindexed corners collapse to four unique vertices
    assert_eq!(quad.vertices.len(), 4);
    assert_eq!(quad.indices.len(), 6);
    assert!(quad.indices.iter().all(|&i| (i as usize) < quad.vertices.len()));
}

#[test]
fn missing_normals_are_generated_unit_length() {
    let path = write_test_gltf();
    let data = MeshData::from_gltf(&path).expect("import");

    // Triangle in the XY plane faces +Z, quad in the XZ plane faces +Y
    for vertex in &data.submeshes[0].vertices {
        assert!(Vec3::from(vertex.normal).abs_diff_eq(Vec3::Z, 1e-5));
    }
    for vertex in &data.submeshes[1].vertices {
        assert!(Vec3::from(vertex.normal).abs_diff_eq(Vec3::Y, 1e-5));
    }
}

#[test]
fn every_index_addresses_its_own_submesh() {
    let path = write_test_gltf();
    let data = MeshData::from_gltf(&path).expect("import");

    for submesh in &data.submeshes {
        assert!(submesh
            .indices
            .iter()
            .all(|&i| (i as usize) < submesh.vertices.len()));
    }
}
