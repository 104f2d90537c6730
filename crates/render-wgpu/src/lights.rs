use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use lightlab_scene::{Light, Scene};

/// Lights beyond this count are dropped from the frame uniform.
pub const MAX_LIGHTS: usize = 16;

/// Discriminant written into [`GpuLight::ground`]`[3]`. Must match the mesh shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum LightKind {
    Ambient = 0,
    Directional = 1,
    Hemisphere = 2,
    Point = 3,
    Spot = 4,
    RectArea = 5,
}

impl From<&Light> for LightKind {
    fn from(light: &Light) -> Self {
        match light {
            Light::Ambient(_) => Self::Ambient,
            Light::Directional(_) => Self::Directional,
            Light::Hemisphere(_) => Self::Hemisphere,
            Light::Point(_) => Self::Point,
            Light::Spot(_) => Self::Spot,
            Light::RectArea(_) => Self::RectArea,
        }
    }
}

/// One light as the mesh shader sees it. Every field is a `vec4` so the
/// array stride stays 16-byte aligned in a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    /// rgb colour (sky colour for hemisphere lights), w = intensity.
    pub color: [f32; 4],
    /// rgb ground colour (hemisphere only), w = kind.
    pub ground: [f32; 4],
    /// xyz world position, w = range (0 is unlimited).
    pub position: [f32; 4],
    /// xyz direction the light travels (up vector for hemisphere), w = decay.
    pub direction: [f32; 4],
    /// Spot: cos outer, cos inner. Rect area: width, height in z, w.
    pub shape: [f32; 4],
}

impl GpuLight {
    pub fn kind(&self) -> u32 {
        self.ground[3] as u32
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FrameLights {
    pub lights: [GpuLight; MAX_LIGHTS],
    pub count: u32,
}

impl FrameLights {
    pub fn active(&self) -> &[GpuLight] {
        &self.lights[..self.count as usize]
    }
}

fn travel_direction(from: Vec3, to: Vec3) -> Vec3 {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec3::ZERO { Vec3::NEG_Y } else { dir }
}

/// Pack the visible lights of `scene` in insertion order.
pub fn pack_lights(scene: &Scene) -> FrameLights {
    let mut packed = FrameLights {
        lights: [GpuLight::zeroed(); MAX_LIGHTS],
        count: 0,
    };
    let mut dropped = 0usize;

    for (node, light) in scene.lights().filter(|(node, _)| node.visible) {
        if packed.count as usize == MAX_LIGHTS {
            dropped += 1;
            continue;
        }
        let position = node.transform.position;
        let kind = LightKind::from(light) as u32 as f32;

        let mut gpu = GpuLight {
            color: light.color().to_rgba(light.intensity()),
            ground: [0.0, 0.0, 0.0, kind],
            position: [position.x, position.y, position.z, 0.0],
            direction: [0.0; 4],
            shape: [0.0; 4],
        };
        match light {
            Light::Ambient(_) => {}
            Light::Directional(l) => {
                gpu.direction = travel_direction(position, l.target).extend(0.0).to_array();
            }
            Light::Hemisphere(l) => {
                gpu.ground = l.ground_color.to_rgba(kind);
                let up = position.normalize_or_zero();
                let up = if up == Vec3::ZERO { Vec3::Y } else { up };
                gpu.direction = up.extend(0.0).to_array();
            }
            Light::Point(l) => {
                gpu.position[3] = l.distance;
                gpu.direction[3] = l.decay;
            }
            Light::Spot(l) => {
                gpu.position[3] = l.distance;
                gpu.direction = travel_direction(position, l.target).extend(l.decay).to_array();
                gpu.shape[0] = l.angle.cos();
                gpu.shape[1] = (l.angle * (1.0 - l.penumbra)).cos();
            }
            Light::RectArea(l) => {
                gpu.direction = node.transform.forward().extend(0.0).to_array();
                gpu.shape[2] = l.width;
                gpu.shape[3] = l.height;
            }
        }
        packed.lights[packed.count as usize] = gpu;
        packed.count += 1;
    }

    if dropped > 0 {
        tracing::warn!(dropped, max = MAX_LIGHTS, "too many lights; extra lights ignored");
    }
    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_common::{Color, Transform};
    use lightlab_scene::light::{AmbientLight, DirectionalLight, HemisphereLight, SpotLight};

    #[test]
    fn kinds_follow_insertion_order() {
        let mut scene = Scene::new();
        scene.add("a", Transform::default(), Light::from(AmbientLight::new(Color::WHITE, 1.0)));
        scene.add(
            "h",
            Transform::from_position(Vec3::Y),
            Light::from(HemisphereLight::new(Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0), 0.9)),
        );
        let packed = pack_lights(&scene);
        assert_eq!(packed.count, 2);
        assert_eq!(packed.active()[0].kind(), LightKind::Ambient as u32);
        let hemi = packed.active()[1];
        assert_eq!(hemi.kind(), LightKind::Hemisphere as u32);
        assert_eq!(&hemi.ground[..3], &[0.0, 0.0, 1.0]);
        assert_eq!(&hemi.direction[..3], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn directional_points_at_target() {
        let mut scene = Scene::new();
        scene.add(
            "d",
            Transform::from_position(Vec3::new(2.0, 0.0, 0.0)),
            Light::from(DirectionalLight::new(Color::WHITE, 0.9)),
        );
        let light = pack_lights(&scene).lights[0];
        assert_eq!(&light.direction[..3], &[-1.0, 0.0, 0.0]);
        assert!((light.color[3] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn spot_cone_uses_penumbra() {
        let mut scene = Scene::new();
        let angle = std::f32::consts::PI * 0.1;
        scene.add(
            "s",
            Transform::from_position(Vec3::new(0.0, 2.0, 3.0)),
            Light::from(SpotLight::new(Color::WHITE, 4.5, 10.0, angle, 0.25, 1.0)),
        );
        let light = pack_lights(&scene).lights[0];
        assert_eq!(light.position[3], 10.0);
        assert_eq!(light.direction[3], 1.0);
        assert!((light.shape[0] - angle.cos()).abs() < 1e-6);
        assert!((light.shape[1] - (angle * 0.75).cos()).abs() < 1e-6);
        assert!(light.shape[1] > light.shape[0]);
    }

    #[test]
    fn hidden_and_excess_lights_are_skipped() {
        let mut scene = Scene::new();
        let hidden = scene.add("off", Transform::default(), Light::from(AmbientLight::new(Color::WHITE, 1.0)));
        scene.set_visible(hidden, false).unwrap();
        for i in 0..MAX_LIGHTS + 3 {
            scene.add(format!("l{i}"), Transform::default(), Light::from(AmbientLight::new(Color::WHITE, 0.1)));
        }
        assert_eq!(pack_lights(&scene).count as usize, MAX_LIGHTS);
    }
}
