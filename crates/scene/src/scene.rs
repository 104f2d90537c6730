use glam::Mat4;
use lightlab_common::{NodeId, Transform};
use serde::{Deserialize, Serialize};

use crate::camera::PerspectiveCamera;
use crate::error::SceneError;
use crate::helper::{Helper, LineSegment};
use crate::light::Light;
use crate::mesh::{MaterialHandle, Mesh, StandardMaterial};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Light(Light),
    Helper(Helper),
    Mesh(Mesh),
    Camera(PerspectiveCamera),
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Light(l) => l.kind_name(),
            NodeKind::Helper(_) => "Helper",
            NodeKind::Mesh(_) => "Mesh",
            NodeKind::Camera(_) => "PerspectiveCamera",
        }
    }
}

impl From<Light> for NodeKind {
    fn from(l: Light) -> Self {
        NodeKind::Light(l)
    }
}

impl From<Helper> for NodeKind {
    fn from(h: Helper) -> Self {
        NodeKind::Helper(h)
    }
}

impl From<Mesh> for NodeKind {
    fn from(m: Mesh) -> Self {
        NodeKind::Mesh(m)
    }
}

impl From<PerspectiveCamera> for NodeKind {
    fn from(c: PerspectiveCamera) -> Self {
        NodeKind::Camera(c)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    /// Hidden nodes are skipped by renderers but still updated.
    pub visible: bool,
}

/// Append-only scene graph.
///
/// Nodes live in a `Vec` indexed by [`NodeId`], so iteration order is
/// insertion order and lookups are O(1). Materials are stored separately so
/// that many meshes can share one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    nodes: Vec<Node>,
    materials: Vec<StandardMaterial>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. Returns its id.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
        kind: impl Into<NodeKind>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let node = Node {
            id,
            name: name.into(),
            transform,
            kind: kind.into(),
            visible: true,
        };
        tracing::debug!(%id, name = %node.name, kind = node.kind.label(), "node added");
        self.nodes.push(node);
        id
    }

    pub fn add_material(&mut self, material: StandardMaterial) -> MaterialHandle {
        let handle = MaterialHandle(self.materials.len() as u32);
        self.materials.push(material);
        handle
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn materials(&self) -> &[StandardMaterial] {
        &self.materials
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(id.index()).ok_or(SceneError::NodeNotFound(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(SceneError::NodeNotFound(id))
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Result<&mut Transform, SceneError> {
        Ok(&mut self.get_mut(id)?.transform)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.get_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn lights(&self) -> impl Iterator<Item = (&Node, &Light)> {
        self.nodes.iter().filter_map(|n| match &n.kind {
            NodeKind::Light(l) => Some((n, l)),
            _ => None,
        })
    }

    pub fn meshes(&self) -> impl Iterator<Item = (&Node, &Mesh)> {
        self.nodes.iter().filter_map(|n| match &n.kind {
            NodeKind::Mesh(m) => Some((n, m)),
            _ => None,
        })
    }

    pub fn helpers(&self) -> impl Iterator<Item = (&Node, &Helper)> {
        self.nodes.iter().filter_map(|n| match &n.kind {
            NodeKind::Helper(h) => Some((n, h)),
            _ => None,
        })
    }

    pub fn light(&self, id: NodeId) -> Result<&Light, SceneError> {
        match &self.get(id)?.kind {
            NodeKind::Light(l) => Ok(l),
            _ => Err(SceneError::NotALight(id)),
        }
    }

    pub fn light_mut(&mut self, id: NodeId) -> Result<&mut Light, SceneError> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Light(l) => Ok(l),
            _ => Err(SceneError::NotALight(id)),
        }
    }

    pub fn camera(&self, id: NodeId) -> Result<&PerspectiveCamera, SceneError> {
        match &self.get(id)?.kind {
            NodeKind::Camera(c) => Ok(c),
            _ => Err(SceneError::NotACamera(id)),
        }
    }

    pub fn camera_mut(&mut self, id: NodeId) -> Result<&mut PerspectiveCamera, SceneError> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Camera(c) => Ok(c),
            _ => Err(SceneError::NotACamera(id)),
        }
    }

    /// Projection * view for the camera node.
    pub fn view_projection(&self, camera: NodeId) -> Result<Mat4, SceneError> {
        let node = self.get(camera)?;
        let NodeKind::Camera(cam) = &node.kind else {
            return Err(SceneError::NotACamera(camera));
        };
        Ok(cam.projection_matrix() * node.transform.matrix().inverse())
    }

    pub fn material(&self, handle: MaterialHandle) -> Result<&StandardMaterial, SceneError> {
        self.materials
            .get(handle.0 as usize)
            .ok_or(SceneError::MaterialNotFound(handle))
    }

    pub fn material_mut(
        &mut self,
        handle: MaterialHandle,
    ) -> Result<&mut StandardMaterial, SceneError> {
        self.materials
            .get_mut(handle.0 as usize)
            .ok_or(SceneError::MaterialNotFound(handle))
    }

    /// Overlay lines for one helper node, built from its light's current state.
    pub fn helper_lines(&self, helper: NodeId) -> Result<Vec<LineSegment>, SceneError> {
        let NodeKind::Helper(h) = &self.get(helper)?.kind else {
            return Ok(Vec::new());
        };
        h.lines(self.get(h.light)?)
    }

    /// Lines of every visible helper. Helpers whose light is missing are
    /// skipped with a warning.
    pub fn visible_helper_lines(&self) -> Vec<LineSegment> {
        let mut out = Vec::new();
        for (node, helper) in self.helpers().filter(|(n, _)| n.visible) {
            match self.get(helper.light).and_then(|light| helper.lines(light)) {
                Ok(lines) => out.extend(lines),
                Err(e) => tracing::warn!(helper = %node.id, error = %e, "skipping helper"),
            }
        }
        out
    }

    /// Deterministic hash of transforms and light intensities, for comparing
    /// runs. Iterates in insertion order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for node in &self.nodes {
            mix(&mut h, &node.id.0.to_le_bytes());
            let t = &node.transform;
            for v in [t.position, t.rotation, t.scale] {
                for c in v.to_array() {
                    mix(&mut h, &c.to_le_bytes());
                }
            }
            if let NodeKind::Light(light) = &node.kind {
                mix(&mut h, &light.intensity().to_le_bytes());
            }
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::{AmbientLight, PointLight};
    use crate::mesh::Geometry;
    use glam::Vec3;
    use lightlab_common::Color;

    fn cube(material: MaterialHandle) -> Mesh {
        Mesh::new(
            Geometry::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            material,
        )
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert!(s.is_empty());
        assert_eq!(s.nodes().len(), 0);
    }

    #[test]
    fn ids_are_dense_and_ordered() {
        let mut s = Scene::new();
        let m = s.add_material(StandardMaterial::default());
        let a = s.add("a", Transform::default(), cube(m));
        let b = s.add("b", Transform::default(), Light::from(AmbientLight::new(Color::WHITE, 1.0)));
        let c = s.add("c", Transform::default(), PerspectiveCamera::default());
        assert_eq!((a, b, c), (NodeId(0), NodeId(1), NodeId(2)));
        let names: Vec<&str> = s.nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn typed_accessors_reject_wrong_kind() {
        let mut s = Scene::new();
        let m = s.add_material(StandardMaterial::default());
        let mesh = s.add("mesh", Transform::default(), cube(m));
        assert_eq!(s.light(mesh), Err(SceneError::NotALight(mesh)));
        assert_eq!(s.camera(mesh), Err(SceneError::NotACamera(mesh)));
        assert_eq!(
            s.get(NodeId(42)).map(|n| n.id),
            Err(SceneError::NodeNotFound(NodeId(42)))
        );
        assert_eq!(
            s.material(MaterialHandle(5)),
            Err(SceneError::MaterialNotFound(MaterialHandle(5)))
        );
    }

    #[test]
    fn meshes_share_material() {
        let mut s = Scene::new();
        let m = s.add_material(StandardMaterial::default().with_roughness(0.4));
        s.add("a", Transform::default(), cube(m));
        s.add("b", Transform::default(), cube(m));
        assert!(s.meshes().all(|(_, mesh)| mesh.material == m));
        s.material_mut(m).unwrap().roughness = 0.9;
        assert_eq!(s.material(m).unwrap().roughness, 0.9);
    }

    #[test]
    fn light_mut_changes_intensity() {
        let mut s = Scene::new();
        let id = s.add("ambient", Transform::default(), Light::from(AmbientLight::new(Color::WHITE, 1.0)));
        s.light_mut(id).unwrap().set_intensity(0.25);
        assert_eq!(s.light(id).unwrap().intensity(), 0.25);
        assert_eq!(s.lights().count(), 1);
    }

    #[test]
    fn hidden_helpers_emit_no_lines() {
        let mut s = Scene::new();
        let light = Light::from(PointLight::new(Color::WHITE, 1.0));
        let lid = s.add("point", Transform::from_position(Vec3::X), light);
        let helper = Helper::for_light(lid, &light, 0.2).unwrap();
        let hid = s.add("point-helper", Transform::default(), helper);
        assert!(!s.visible_helper_lines().is_empty());
        assert_eq!(s.helper_lines(hid).unwrap().len(), s.visible_helper_lines().len());

        s.set_visible(hid, false).unwrap();
        assert!(s.visible_helper_lines().is_empty());
    }

    #[test]
    fn view_projection_requires_camera() {
        let mut s = Scene::new();
        let cam = s.add("camera", Transform::from_position(Vec3::new(0.0, 0.0, 5.0)), PerspectiveCamera::default());
        let origin = s.view_projection(cam).unwrap().project_point3(Vec3::ZERO);
        assert!(origin.x.abs() < 1e-6 && origin.y.abs() < 1e-6);
        let light = s.add("ambient", Transform::default(), Light::from(AmbientLight::new(Color::WHITE, 1.0)));
        assert_eq!(s.view_projection(light), Err(SceneError::NotACamera(light)));
    }

    #[test]
    fn state_hash_tracks_rotation() {
        let mut s = Scene::new();
        let m = s.add_material(StandardMaterial::default());
        let id = s.add("cube", Transform::default(), cube(m));
        let before = s.state_hash();
        assert_eq!(before, s.clone().state_hash());

        s.transform_mut(id).unwrap().rotation.y = 1.0;
        assert_ne!(before, s.state_hash());
    }
}
