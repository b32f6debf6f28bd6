//! CPU-side checks of the shadow pipeline math: the coordinates the depth
//! pass writes through the light matrix must be exactly the coordinates the
//! lit pass derives when it samples the map.

use glam::{Mat4, Vec3};
use shadowbox::renderer::{DirectionalLight, Light, SpotLight};

const EPSILON: f32 = 1e-5;

/// The lit pass's shadow-coordinate derivation: clip space through the
/// light matrix, perspective divide, NDC xy mapped to texture uv with the
/// y axis flipped.
fn project_to_shadow_map(light_view_proj: Mat4, world_pos: Vec3) -> Option<Vec3> {
    let clip = light_view_proj * world_pos.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec3::new(ndc.x * 0.5 + 0.5, -ndc.y * 0.5 + 0.5, ndc.z))
}

fn sample_points() -> Vec<Vec3> {
    vec![
        Vec3::new(-3.5, 0.0, -2.0),
        Vec3::new(2.0, 1.0, 4.0),
        Vec3::new(4.5, -0.5, -3.0),
        Vec3::ZERO,
    ]
}

#[test]
fn directional_depth_written_equals_depth_read() {
    let light = Light::Directional(DirectionalLight {
        direction: Vec3::new(0.4, -1.0, 0.2).normalize(),
        ..Default::default()
    });
    let matrix = light.view_proj();

    for point in sample_points() {
        // Depth the shadow pass stores for this point
        let clip = matrix * point.extend(1.0);
        let written_depth = clip.z / clip.w;

        // Coordinates the lit pass uses to read it back
        let projected = project_to_shadow_map(matrix, point).expect("in front of light");

        assert!((projected.z - written_depth).abs() < EPSILON);
        assert!(projected.x >= -EPSILON && projected.x <= 1.0 + EPSILON);
        assert!(projected.y >= -EPSILON && projected.y <= 1.0 + EPSILON);
        assert!(projected.z >= -EPSILON && projected.z <= 1.0 + EPSILON);
    }
}

#[test]
fn light_matrix_is_independent_of_the_camera() {
    let light = Light::Directional(DirectionalLight {
        direction: Vec3::new(0.0, -1.0, 0.3).normalize(),
        ..Default::default()
    });
    let light_matrix = light.view_proj();

    // Two very different cameras; the light matrix must not change with them
    let cam_a = Mat4::perspective_rh(1.3, 16.0 / 9.0, 0.1, 100.0)
        * Mat4::look_at_rh(Vec3::new(8.0, 10.0, 8.0), Vec3::ZERO, Vec3::Y);
    let cam_b = Mat4::perspective_rh(0.6, 1.0, 1.0, 40.0)
        * Mat4::look_at_rh(Vec3::new(-2.0, 1.0, 0.0), Vec3::ZERO, Vec3::Y);

    assert_ne!(cam_a, cam_b);
    assert_eq!(light_matrix, light.view_proj());
    assert_ne!(light_matrix, cam_a);
    assert_ne!(light_matrix, cam_b);
}

#[test]
fn shadow_texture_axis_is_flipped_from_clip_space() {
    let light = Light::Directional(DirectionalLight {
        direction: Vec3::new(0.0, -1.0, 0.0),
        ..Default::default()
    });
    let matrix = light.view_proj();

    // With a straight-down light the look-at's up vector is +Z
    let top_world = Vec3::Z * 5.0;
    let bottom_world = -Vec3::Z * 5.0;

    let ndc_top = (matrix * top_world.extend(1.0)).truncate();
    let ndc_bottom = (matrix * bottom_world.extend(1.0)).truncate();
    assert!(ndc_top.y > ndc_bottom.y);

    let tex_top = project_to_shadow_map(matrix, top_world).unwrap();
    let tex_bottom = project_to_shadow_map(matrix, bottom_world).unwrap();
    assert!(tex_top.y < tex_bottom.y);
}

#[test]
fn spot_projection_rejects_points_behind_the_light() {
    let light = Light::Spot(SpotLight {
        position: Vec3::new(0.0, 10.0, 0.0),
        direction: Vec3::new(0.0, -1.0, 0.0),
        ..Default::default()
    });
    let matrix = light.view_proj();

    assert!(project_to_shadow_map(matrix, Vec3::new(0.0, 15.0, 0.0)).is_none());

    let below = project_to_shadow_map(matrix, Vec3::ZERO).expect("inside the cone");
    assert!((below.x - 0.5).abs() < EPSILON);
    assert!((below.y - 0.5).abs() < EPSILON);
    assert!(below.z > 0.0 && below.z < 1.0);
}

#[test]
fn points_inside_the_shadow_volume_project_inside_the_map() {
    let light = Light::Directional(DirectionalLight {
        direction: Vec3::new(-0.3, -1.0, 0.5).normalize(),
        ..Default::default()
    });
    let matrix = light.view_proj();

    for x in -5..=5 {
        for z in -5..=5 {
            let point = Vec3::new(x as f32, 0.0, z as f32);
            let projected = project_to_shadow_map(matrix, point).expect("in front of light");
            assert!(projected.x > 0.0 && projected.x < 1.0, "{point:?}");
            assert!(projected.y > 0.0 && projected.y < 1.0, "{point:?}");
            assert!(projected.z > 0.0 && projected.z < 1.0, "{point:?}");
        }
    }
}
