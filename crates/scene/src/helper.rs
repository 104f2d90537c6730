use glam::Vec3;
use lightlab_common::{Color, NodeId, Transform};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::light::Light;
use crate::scene::{Node, NodeKind};

const CIRCLE_SEGMENTS: usize = 16;
const SPOT_RIM_SEGMENTS: usize = 32;
/// Cone length drawn for a spot light with unlimited range.
const UNBOUNDED_SPOT_LENGTH: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelperKind {
    Hemisphere,
    Directional,
    Point,
    Spot,
    RectArea,
}

/// A world-space colored line, the unit helpers are drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub a: Vec3,
    pub b: Vec3,
    pub color: Color,
}

/// Debug overlay that visualizes one light.
///
/// A helper stores no geometry of its own. [`Helper::lines`] rebuilds the
/// overlay from the light's current transform and parameters each time it
/// is called.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Helper {
    pub light: NodeId,
    pub kind: HelperKind,
    pub size: f32,
}

impl Helper {
    /// Helper matching the light's type. Ambient light has no visual extent,
    /// so it gets none.
    pub fn for_light(light_id: NodeId, light: &Light, size: f32) -> Option<Self> {
        let kind = match light {
            Light::Ambient(_) => return None,
            Light::Directional(_) => HelperKind::Directional,
            Light::Hemisphere(_) => HelperKind::Hemisphere,
            Light::Point(_) => HelperKind::Point,
            Light::RectArea(_) => HelperKind::RectArea,
            Light::Spot(_) => HelperKind::Spot,
        };
        Some(Self {
            light: light_id,
            kind,
            size,
        })
    }

    /// Build the overlay for `light_node`, which must be the watched light.
    pub fn lines(&self, light_node: &Node) -> Result<Vec<LineSegment>, SceneError> {
        let NodeKind::Light(light) = &light_node.kind else {
            return Err(SceneError::NotALight(light_node.id));
        };
        let t = &light_node.transform;
        let mut out = Vec::new();
        match light {
            Light::Ambient(_) => {}
            Light::Hemisphere(l) => {
                hemisphere(t.position, self.size, l.sky_color, l.ground_color, &mut out)
            }
            Light::Directional(l) => directional(t.position, l.target, self.size, l.color, &mut out),
            Light::Point(l) => point(t.position, self.size, l.color, &mut out),
            Light::Spot(l) => {
                let length = if l.distance > 0.0 {
                    l.distance
                } else {
                    UNBOUNDED_SPOT_LENGTH
                };
                spot(t.position, l.target, length, l.angle, l.color, &mut out)
            }
            Light::RectArea(l) => rect_area(t, l.width, l.height, l.color, &mut out),
        }
        Ok(out)
    }
}

fn push(out: &mut Vec<LineSegment>, a: Vec3, b: Vec3, color: Color) {
    out.push(LineSegment { a, b, color });
}

fn circle(out: &mut Vec<LineSegment>, center: Vec3, u: Vec3, v: Vec3, radius: f32, segments: usize, color: Color) {
    let at = |i: usize| {
        let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
        center + (u * theta.cos() + v * theta.sin()) * radius
    };
    for i in 0..segments {
        push(out, at(i), at(i + 1), color);
    }
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    Color::rgb(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
    )
}

fn hemisphere(position: Vec3, size: f32, sky: Color, ground: Color, out: &mut Vec<LineSegment>) {
    let up = position.try_normalize().unwrap_or(Vec3::Y);
    let (a, b) = up.any_orthonormal_pair();
    let top = position + up * size;
    let bottom = position - up * size;
    let ring = [a, b, -a, -b].map(|d| position + d * size);
    let equator = lerp(sky, ground, 0.5);
    for i in 0..4 {
        push(out, top, ring[i], sky);
        push(out, bottom, ring[i], ground);
        push(out, ring[i], ring[(i + 1) % 4], equator);
    }
}

fn directional(position: Vec3, target: Vec3, size: f32, color: Color, out: &mut Vec<LineSegment>) {
    let dir = (target - position).try_normalize().unwrap_or(Vec3::NEG_Z);
    let (a, b) = dir.any_orthonormal_pair();
    let corners = [a + b, a - b, -a - b, -a + b].map(|d| position + d * size);
    for i in 0..4 {
        push(out, corners[i], corners[(i + 1) % 4], color);
    }
    push(out, position, target, color);
}

fn point(position: Vec3, size: f32, color: Color, out: &mut Vec<LineSegment>) {
    circle(out, position, Vec3::X, Vec3::Y, size, CIRCLE_SEGMENTS, color);
    circle(out, position, Vec3::Y, Vec3::Z, size, CIRCLE_SEGMENTS, color);
    circle(out, position, Vec3::X, Vec3::Z, size, CIRCLE_SEGMENTS, color);
}

fn spot(apex: Vec3, target: Vec3, length: f32, angle: f32, color: Color, out: &mut Vec<LineSegment>) {
    let dir = (target - apex).try_normalize().unwrap_or(Vec3::NEG_Z);
    let (a, b) = dir.any_orthonormal_pair();
    let rim_center = apex + dir * length;
    let rim_radius = length * angle.tan();
    for d in [a, b, -a, -b] {
        push(out, apex, rim_center + d * rim_radius, color);
    }
    circle(out, rim_center, a, b, rim_radius, SPOT_RIM_SEGMENTS, color);
}

fn rect_area(transform: &Transform, width: f32, height: f32, color: Color, out: &mut Vec<LineSegment>) {
    let m = transform.matrix();
    let (hw, hh) = (width * 0.5, height * 0.5);
    let corners = [
        Vec3::new(-hw, -hh, 0.0),
        Vec3::new(hw, -hh, 0.0),
        Vec3::new(hw, hh, 0.0),
        Vec3::new(-hw, hh, 0.0),
    ]
    .map(|c| m.transform_point3(c));
    for i in 0..4 {
        push(out, corners[i], corners[(i + 1) % 4], color);
    }
    let facing = m.transform_point3(Vec3::new(0.0, 0.0, -hw.min(hh)));
    push(out, transform.position, facing, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::{AmbientLight, DirectionalLight, HemisphereLight, PointLight, RectAreaLight, SpotLight};

    fn light_node(light: impl Into<Light>, position: Vec3) -> Node {
        Node {
            id: NodeId(0),
            name: "light".into(),
            transform: Transform::from_position(position),
            kind: NodeKind::Light(light.into()),
            visible: true,
        }
    }

    fn helper_for(node: &Node, size: f32) -> Helper {
        let NodeKind::Light(light) = &node.kind else {
            panic!("not a light");
        };
        Helper::for_light(node.id, light, size).unwrap()
    }

    #[test]
    fn ambient_has_no_helper() {
        let light: Light = AmbientLight::new(Color::WHITE, 1.0).into();
        assert!(Helper::for_light(NodeId(0), &light, 0.2).is_none());
    }

    #[test]
    fn line_counts_per_kind() {
        let cases: Vec<(Node, usize)> = vec![
            (
                light_node(
                    HemisphereLight::new(Color::from_hex(0xff0000), Color::from_hex(0x0000ff), 0.9),
                    Vec3::Y,
                ),
                12,
            ),
            (light_node(DirectionalLight::new(Color::WHITE, 0.9), Vec3::new(1.0, 0.25, 0.0)), 5),
            (light_node(PointLight::new(Color::WHITE, 1.5), Vec3::new(1.0, 0.0, 1.0)), 3 * CIRCLE_SEGMENTS),
            (
                light_node(SpotLight::new(Color::WHITE, 4.5, 10.0, 0.3, 0.25, 1.0), Vec3::new(0.0, 2.0, 3.0)),
                4 + SPOT_RIM_SEGMENTS,
            ),
            (light_node(RectAreaLight::new(Color::WHITE, 6.0, 1.0, 1.0), Vec3::new(-1.5, 0.0, 1.5)), 5),
        ];
        for (node, expected) in cases {
            let lines = helper_for(&node, 0.2).lines(&node).unwrap();
            assert_eq!(lines.len(), expected, "{:?}", node.kind);
        }
    }

    #[test]
    fn point_helper_circles_have_helper_radius() {
        let center = Vec3::new(1.0, 0.0, 1.0);
        let node = light_node(PointLight::new(Color::WHITE, 1.0), center);
        for seg in helper_for(&node, 0.2).lines(&node).unwrap() {
            assert!((seg.a.distance(center) - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn spot_helper_follows_current_state() {
        let mut node = light_node(
            SpotLight::new(Color::WHITE, 4.5, 10.0, std::f32::consts::PI * 0.1, 0.25, 1.0),
            Vec3::new(0.0, 2.0, 3.0),
        );
        let helper = helper_for(&node, 0.2);
        let before = helper.lines(&node).unwrap();

        node.transform.position = Vec3::new(0.0, 4.0, 0.0);
        let after = helper.lines(&node).unwrap();

        assert_eq!(before[0].a, Vec3::new(0.0, 2.0, 3.0));
        assert_eq!(after[0].a, Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn spot_cone_reaches_range() {
        let node = light_node(SpotLight::new(Color::WHITE, 1.0, 10.0, 0.3, 0.0, 1.0), Vec3::new(0.0, 10.0, 0.0));
        let lines = helper_for(&node, 0.2).lines(&node).unwrap();
        // Rim is centered on the target, which sits exactly `distance` below.
        let rim_point = lines[0].b;
        assert!(rim_point.y.abs() < 1e-4);
        assert!((Vec3::new(rim_point.x, 0.0, rim_point.z).length() - 10.0 * 0.3f32.tan()).abs() < 1e-3);
    }

    #[test]
    fn rect_area_outline_matches_size() {
        let node = light_node(RectAreaLight::new(Color::WHITE, 6.0, 2.0, 1.0), Vec3::ZERO);
        let lines = helper_for(&node, 0.2).lines(&node).unwrap();
        assert!((lines[0].a.distance(lines[0].b) - 2.0).abs() < 1e-5);
        assert!((lines[1].a.distance(lines[1].b) - 1.0).abs() < 1e-5);
        // Facing line points down local -Z.
        assert!(lines[4].b.z < 0.0);
    }

    #[test]
    fn non_light_node_is_rejected() {
        let light = light_node(PointLight::new(Color::WHITE, 1.0), Vec3::ZERO);
        let helper = helper_for(&light, 0.2);
        let camera = Node {
            id: NodeId(9),
            name: "camera".into(),
            transform: Transform::default(),
            kind: NodeKind::Camera(crate::camera::PerspectiveCamera::default()),
            visible: true,
        };
        assert_eq!(helper.lines(&camera), Err(SceneError::NotALight(NodeId(9))));
    }
}
