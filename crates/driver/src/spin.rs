use lightlab_common::NodeId;
use lightlab_scene::{Scene, SceneError};
use serde::{Deserialize, Serialize};

/// Angular speed about the X and Y axes, radians per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinRate {
    pub x: f32,
    pub y: f32,
}

impl Default for SpinRate {
    fn default() -> Self {
        Self { x: 0.15, y: 0.1 }
    }
}

/// Drives one node's X/Y rotation from elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    pub node: NodeId,
    pub rate: SpinRate,
}

impl Spinner {
    pub fn new(node: NodeId, rate: SpinRate) -> Self {
        Self { node, rate }
    }

    /// Rotation `(x, y)` at elapsed time `t`.
    pub fn angles_at(&self, t: f64) -> (f32, f32) {
        (
            (self.rate.x as f64 * t) as f32,
            (self.rate.y as f64 * t) as f32,
        )
    }

    /// Overwrite the node's X and Y rotation with `rate * t`. Z, position and
    /// scale are left alone.
    pub fn apply(&self, scene: &mut Scene, t: f64) -> Result<(), SceneError> {
        let (x, y) = self.angles_at(t);
        let transform = scene.transform_mut(self.node)?;
        transform.rotation.x = x;
        transform.rotation.y = y;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use lightlab_common::Transform;
    use lightlab_scene::{Geometry, Mesh, StandardMaterial};

    fn scene_with_mesh() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let m = scene.add_material(StandardMaterial::default());
        let id = scene.add(
            "cube",
            Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).with_rotation(Vec3::new(9.0, 9.0, 0.7)),
            Mesh::new(
                Geometry::Box {
                    width: 1.0,
                    height: 1.0,
                    depth: 1.0,
                },
                m,
            ),
        );
        (scene, id)
    }

    #[test]
    fn rotation_is_rate_times_time() {
        let (mut scene, id) = scene_with_mesh();
        let spinner = Spinner::new(id, SpinRate::default());
        for t in [0.0, 0.5, 3.0, 10.0, 1234.5] {
            spinner.apply(&mut scene, t).unwrap();
            let r = scene.get(id).unwrap().transform.rotation;
            assert!((r.x as f64 - 0.15f32 as f64 * t).abs() < 1e-3 * (1.0 + t));
            assert!((r.y as f64 - 0.1f32 as f64 * t).abs() < 1e-3 * (1.0 + t));
        }
    }

    #[test]
    fn apply_ignores_previous_rotation() {
        let (mut scene, id) = scene_with_mesh();
        let spinner = Spinner::new(id, SpinRate::default());
        spinner.apply(&mut scene, 2.0).unwrap();
        let first = scene.get(id).unwrap().transform;
        spinner.apply(&mut scene, 7.0).unwrap();
        spinner.apply(&mut scene, 2.0).unwrap();
        assert_eq!(scene.get(id).unwrap().transform, first);
    }

    #[test]
    fn other_components_untouched() {
        let (mut scene, id) = scene_with_mesh();
        Spinner::new(id, SpinRate::default()).apply(&mut scene, 4.0).unwrap();
        let t = scene.get(id).unwrap().transform;
        assert_eq!(t.rotation.z, 0.7);
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn missing_node_is_an_error() {
        let (mut scene, _) = scene_with_mesh();
        let err = Spinner::new(NodeId(12), SpinRate::default()).apply(&mut scene, 1.0);
        assert_eq!(err, Err(SceneError::NodeNotFound(NodeId(12))));
    }
}
