use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Extent of the world covered by a directional light's shadow projection.
const SHADOW_DISTANCE: f32 = 30.0;
const SHADOW_SIZE: f32 = 15.0;

const SHADOW_NEAR: f32 = 0.1;

/// Far plane for the spot light's perspective shadow projection.
const SPOT_SHADOW_FAR: f32 = 50.0;

#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Vec3,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, 0.0),
            color: Vec3::ONE,
            ambient_intensity: 0.2,
            diffuse_intensity: 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    /// Half-angle of the cone, in degrees.
    pub cutoff_deg: f32,
    /// Quadratic distance falloff coefficient.
    pub attenuation: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 0.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
            color: Vec3::ONE,
            ambient_intensity: 0.1,
            diffuse_intensity: 0.9,
            cutoff_deg: 25.0,
            attenuation: 0.02,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Light {
    Directional(DirectionalLight),
    Spot(SpotLight),
}

impl Light {
    /// View-projection from the light's own viewpoint, independent of the
    /// camera: orthographic along the light direction for directional
    /// lights, perspective from the light position for spot lights.
    pub fn view_proj(&self) -> Mat4 {
        match self {
            Light::Directional(light) => {
                let direction = light.direction.normalize_or_zero();
                let focus = Vec3::ZERO;
                let light_pos = focus - direction * SHADOW_DISTANCE;
                let view = Mat4::look_at_rh(light_pos, focus, shadow_up(direction));
                let proj = Mat4::orthographic_rh(
                    -SHADOW_SIZE,
                    SHADOW_SIZE,
                    -SHADOW_SIZE,
                    SHADOW_SIZE,
                    SHADOW_NEAR,
                    SHADOW_DISTANCE * 2.0,
                );
                proj * view
            }
            Light::Spot(light) => {
                let direction = light.direction.normalize_or_zero();
                let view = Mat4::look_at_rh(
                    light.position,
                    light.position + direction,
                    shadow_up(direction),
                );
                // The cone's full opening angle, kept away from degenerate
                // and >180 degree projections
                let fov_y = (2.0 * light.cutoff_deg.to_radians()).clamp(0.05, 3.0);
                let proj = Mat4::perspective_rh(fov_y, 1.0, SHADOW_NEAR, SPOT_SHADOW_FAR);
                proj * view
            }
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        match self {
            Light::Directional(light) => LightUniform {
                color_ambient: extend(light.color, light.ambient_intensity),
                direction_diffuse: extend(
                    light.direction.normalize_or_zero(),
                    light.diffuse_intensity,
                ),
                position_attenuation: [0.0; 4],
                cone: [0.0, 0.0, 0.0, 0.0],
            },
            Light::Spot(light) => LightUniform {
                color_ambient: extend(light.color, light.ambient_intensity),
                direction_diffuse: extend(
                    light.direction.normalize_or_zero(),
                    light.diffuse_intensity,
                ),
                position_attenuation: extend(light.position, light.attenuation),
                cone: [light.cutoff_deg.to_radians().cos(), 1.0, 0.0, 0.0],
            },
        }
    }
}

/// Up vector for the light's look-at that never degenerates when the light
/// points straight up or down.
fn shadow_up(direction: Vec3) -> Vec3 {
    if direction.abs().dot(Vec3::Y) > 0.95 {
        Vec3::Z
    } else {
        Vec3::Y
    }
}

fn extend(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

/// GPU-side light parameters. `cone[0]` holds the cosine of the spot cutoff
/// and `cone[1]` is 1.0 for spot lights, 0.0 for directional lights.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct LightUniform {
    pub color_ambient: [f32; 4],
    pub direction_diffuse: [f32; 4],
    pub position_attenuation: [f32; 4],
    pub cone: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_uniform_is_64_bytes() {
        // 4 * vec4<f32>
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
    }

    #[test]
    fn directional_uniform_has_zero_spot_flag() {
        let uniform = Light::Directional(DirectionalLight::default()).to_uniform();
        assert_eq!(uniform.cone[1], 0.0);
        assert_eq!(uniform.color_ambient[3], 0.2);
        assert_eq!(uniform.direction_diffuse[3], 0.8);
    }

    #[test]
    fn spot_uniform_encodes_cutoff_cosine() {
        let spot = SpotLight {
            cutoff_deg: 60.0,
            ..Default::default()
        };
        let uniform = Light::Spot(spot).to_uniform();
        assert_eq!(uniform.cone[1], 1.0);
        assert!((uniform.cone[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn uniform_direction_is_normalized() {
        let light = DirectionalLight {
            direction: Vec3::new(0.0, -10.0, 0.0),
            ..Default::default()
        };
        let uniform = Light::Directional(light).to_uniform();
        assert!((uniform.direction_diffuse[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn directional_view_proj_centers_the_focus_point() {
        let light = Light::Directional(DirectionalLight {
            direction: Vec3::new(0.4, -1.0, 0.2).normalize(),
            ..Default::default()
        });
        let clip = light.view_proj() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn directional_view_proj_survives_a_straight_down_light() {
        let light = Light::Directional(DirectionalLight {
            direction: Vec3::new(0.0, -1.0, 0.0),
            ..Default::default()
        });
        let matrix = light.view_proj();
        assert!(matrix.is_finite());
        assert!(matrix.determinant() != 0.0);
    }

    #[test]
    fn spot_view_proj_looks_along_the_cone_axis() {
        let spot = SpotLight {
            position: Vec3::new(0.0, 10.0, 0.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
            ..Default::default()
        };
        let matrix = Light::Spot(spot).view_proj();
        // A point straight below the light lands in the center of the map
        let clip = matrix * Vec3::new(0.0, 0.0, 0.0).extend(1.0);
        assert!(clip.w > 0.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        // A point behind the light projects with non-positive w
        let behind = matrix * Vec3::new(0.0, 15.0, 0.0).extend(1.0);
        assert!(behind.w <= 0.0);
    }
}
