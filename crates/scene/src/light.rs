use glam::Vec3;
use lightlab_common::Color;
use serde::{Deserialize, Serialize};

/// Uniform light applied to every surface regardless of orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Parallel rays travelling from the node position towards `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub target: Vec3,
}

/// Sky/ground gradient. "Up" is the normalized node position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HemisphereLight {
    pub sky_color: Color,
    pub ground_color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    /// Cutoff range. Zero means unlimited.
    pub distance: f32,
    pub decay: f32,
}

/// Emitting rectangle in the node's local XY plane, facing local -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectAreaLight {
    pub color: Color,
    pub intensity: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    /// Half-angle of the cone, radians.
    pub angle: f32,
    /// Fraction of the cone that fades out, `[0, 1]`.
    pub penumbra: f32,
    pub decay: f32,
    pub target: Vec3,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            target: Vec3::ZERO,
        }
    }
}

impl HemisphereLight {
    pub fn new(sky_color: Color, ground_color: Color, intensity: f32) -> Self {
        Self {
            sky_color,
            ground_color,
            intensity,
        }
    }
}

impl PointLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            distance: 0.0,
            decay: 2.0,
        }
    }
}

impl RectAreaLight {
    pub fn new(color: Color, intensity: f32, width: f32, height: f32) -> Self {
        Self {
            color,
            intensity,
            width,
            height,
        }
    }
}

impl SpotLight {
    pub fn new(
        color: Color,
        intensity: f32,
        distance: f32,
        angle: f32,
        penumbra: f32,
        decay: f32,
    ) -> Self {
        Self {
            color,
            intensity,
            distance,
            angle: angle.clamp(0.0, std::f32::consts::FRAC_PI_2),
            penumbra: penumbra.clamp(0.0, 1.0),
            decay,
            target: Vec3::ZERO,
        }
    }
}

/// Any of the supported light sources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Light {
    Ambient(AmbientLight),
    Directional(DirectionalLight),
    Hemisphere(HemisphereLight),
    Point(PointLight),
    RectArea(RectAreaLight),
    Spot(SpotLight),
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient(l) => l.intensity,
            Light::Directional(l) => l.intensity,
            Light::Hemisphere(l) => l.intensity,
            Light::Point(l) => l.intensity,
            Light::RectArea(l) => l.intensity,
            Light::Spot(l) => l.intensity,
        }
    }

    /// Set the intensity. Negative values are clamped to zero.
    pub fn set_intensity(&mut self, value: f32) {
        let value = if value < 0.0 {
            tracing::warn!(value, kind = self.kind_name(), "negative light intensity clamped to 0");
            0.0
        } else {
            value
        };
        match self {
            Light::Ambient(l) => l.intensity = value,
            Light::Directional(l) => l.intensity = value,
            Light::Hemisphere(l) => l.intensity = value,
            Light::Point(l) => l.intensity = value,
            Light::RectArea(l) => l.intensity = value,
            Light::Spot(l) => l.intensity = value,
        }
    }

    /// Primary color. For hemisphere lights this is the sky color.
    pub fn color(&self) -> Color {
        match self {
            Light::Ambient(l) => l.color,
            Light::Directional(l) => l.color,
            Light::Hemisphere(l) => l.sky_color,
            Light::Point(l) => l.color,
            Light::RectArea(l) => l.color,
            Light::Spot(l) => l.color,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Light::Ambient(_) => "AmbientLight",
            Light::Directional(_) => "DirectionalLight",
            Light::Hemisphere(_) => "HemisphereLight",
            Light::Point(_) => "PointLight",
            Light::RectArea(_) => "RectAreaLight",
            Light::Spot(_) => "SpotLight",
        }
    }

    /// Where the light points, if it has a target.
    pub fn target(&self) -> Option<Vec3> {
        match self {
            Light::Directional(l) => Some(l.target),
            Light::Spot(l) => Some(l.target),
            _ => None,
        }
    }
}

impl From<AmbientLight> for Light {
    fn from(l: AmbientLight) -> Self {
        Light::Ambient(l)
    }
}

impl From<DirectionalLight> for Light {
    fn from(l: DirectionalLight) -> Self {
        Light::Directional(l)
    }
}

impl From<HemisphereLight> for Light {
    fn from(l: HemisphereLight) -> Self {
        Light::Hemisphere(l)
    }
}

impl From<PointLight> for Light {
    fn from(l: PointLight) -> Self {
        Light::Point(l)
    }
}

impl From<RectAreaLight> for Light {
    fn from(l: RectAreaLight) -> Self {
        Light::RectArea(l)
    }
}

impl From<SpotLight> for Light {
    fn from(l: SpotLight) -> Self {
        Light::Spot(l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_is_clamped_non_negative() {
        let mut light: Light = AmbientLight::new(Color::WHITE, 1.0).into();
        light.set_intensity(-3.0);
        assert_eq!(light.intensity(), 0.0);
        light.set_intensity(0.42);
        assert_eq!(light.intensity(), 0.42);
    }

    #[test]
    fn point_light_defaults_match_physical_falloff() {
        let p = PointLight::new(Color::from_hex(0xff9000), 1.5);
        assert_eq!(p.distance, 0.0);
        assert_eq!(p.decay, 2.0);
    }

    #[test]
    fn spot_light_clamps_cone_parameters() {
        let s = SpotLight::new(Color::WHITE, 1.0, 10.0, 4.0, 1.5, 1.0);
        assert_eq!(s.angle, std::f32::consts::FRAC_PI_2);
        assert_eq!(s.penumbra, 1.0);
    }

    #[test]
    fn hemisphere_reports_sky_color() {
        let sky = Color::from_hex(0xff0000);
        let light: Light = HemisphereLight::new(sky, Color::from_hex(0x0000ff), 0.9).into();
        assert_eq!(light.color(), sky);
        assert_eq!(light.kind_name(), "HemisphereLight");
        assert!(light.target().is_none());
    }

    #[test]
    fn light_serializes_with_type_tag() {
        let light: Light = DirectionalLight::new(Color::WHITE, 0.9).into();
        let json = serde_json::to_string(&light).unwrap();
        assert!(json.contains("\"type\":\"Directional\""));
    }
}
