use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Identifier of a node in a scene.
///
/// Ids are dense and handed out in insertion order; the scene never removes
/// nodes, so an id stays valid for the life of its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Spatial transform: position, Euler rotation, scale.
///
/// `rotation` holds per-axis angles in radians, applied in intrinsic X, Y, Z
/// order. Keeping the angles (rather than a quaternion) lets callers drive a
/// single axis without disturbing the others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Local-to-world matrix (translation * rotation * scale).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }

    /// Direction the local -Z axis points to in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation_quat() * Vec3::NEG_Z
    }

    /// Orient so that local -Z points at `target`, keeping `up` as the
    /// reference vertical. Leaves the rotation untouched when `target`
    /// coincides with the position.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let back = self.position - target;
        if back.length_squared() <= f32::EPSILON {
            return;
        }
        let z = back.normalize();
        let mut x = up.cross(z);
        if x.length_squared() <= f32::EPSILON {
            // Looking straight along `up`: pick any perpendicular axis.
            x = z.any_orthonormal_vector();
        }
        let x = x.normalize();
        let y = z.cross(x);
        let q = Quat::from_mat3(&Mat3::from_cols(x, y, z));
        let (rx, ry, rz) = q.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(rx, ry, rz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn node_id_orders_by_insertion() {
        assert!(NodeId(0) < NodeId(1));
        assert_eq!(NodeId(7).index(), 7);
        assert_eq!(format!("{}", NodeId(3)), "#3");
    }

    #[test]
    fn single_axis_rotation_matches_quat() {
        let t = Transform::default().with_rotation(Vec3::new(0.0, 1.0, 0.0));
        let expected = Quat::from_rotation_y(1.0);
        assert!(t.rotation_quat().angle_between(expected) < 1e-5);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut t = Transform::from_position(Vec3::new(1.0, 1.0, 2.0));
        t.look_at(Vec3::ZERO, Vec3::Y);
        let expected = (Vec3::ZERO - t.position).normalize();
        assert!(t.forward().distance(expected) < 1e-4);
    }

    #[test]
    fn look_at_straight_down_is_finite() {
        let mut t = Transform::from_position(Vec3::new(0.0, 5.0, 0.0));
        t.look_at(Vec3::ZERO, Vec3::Y);
        assert!(t.rotation.is_finite());
        assert!(t.forward().distance(Vec3::NEG_Y) < 1e-4);
    }

    #[test]
    fn look_at_self_is_noop() {
        let mut t = Transform::from_position(Vec3::ONE).with_rotation(Vec3::new(0.3, 0.0, 0.0));
        t.look_at(Vec3::ONE, Vec3::Y);
        assert_eq!(t.rotation, Vec3::new(0.3, 0.0, 0.0));
    }
}
