use lightlab_common::NodeId;
use lightlab_scene::{NodeKind, Scene};
use serde::Serialize;

/// Scene inspector for developer tooling.
///
/// Read-only queries against the scene for the CLI and the desktop side panel.
pub struct SceneInspector;

impl SceneInspector {
    /// Count nodes by kind.
    pub fn summary(scene: &Scene) -> SceneSummary {
        let mut summary = SceneSummary {
            nodes: scene.len(),
            lights: 0,
            helpers: 0,
            meshes: 0,
            cameras: 0,
            materials: scene.materials().len(),
            state_hash: scene.state_hash(),
        };
        for node in scene.nodes() {
            match node.kind {
                NodeKind::Light(_) => summary.lights += 1,
                NodeKind::Helper(_) => summary.helpers += 1,
                NodeKind::Mesh(_) => summary.meshes += 1,
                NodeKind::Camera(_) => summary.cameras += 1,
            }
        }
        summary
    }

    pub fn inspect_node(scene: &Scene, id: NodeId) -> Option<NodeInfo> {
        let node = scene.get(id).ok()?;
        let t = &node.transform;
        let detail = match &node.kind {
            NodeKind::Light(light) => format!("intensity={:.2}", light.intensity()),
            NodeKind::Helper(h) => format!("light={} size={:.2}", h.light, h.size),
            NodeKind::Mesh(m) => format!("{} {}", m.geometry.name(), m.material),
            NodeKind::Camera(c) => format!("fov={:.0} aspect={:.3}", c.fov_degrees, c.aspect),
        };
        Some(NodeInfo {
            id,
            name: node.name.clone(),
            kind: node.kind.label(),
            position: t.position.to_array(),
            rotation: t.rotation.to_array(),
            scale: t.scale.to_array(),
            visible: node.visible,
            detail,
        })
    }

    /// Every node, in insertion order.
    pub fn list_nodes(scene: &Scene) -> Vec<NodeInfo> {
        scene
            .nodes()
            .iter()
            .filter_map(|n| Self::inspect_node(scene, n.id))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub nodes: usize,
    pub lights: usize,
    pub helpers: usize,
    pub meshes: usize,
    pub cameras: usize,
    pub materials: usize,
    pub state_hash: u64,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: nodes={} lights={} helpers={} meshes={} cameras={} materials={} hash={:016x}",
            self.nodes,
            self.lights,
            self.helpers,
            self.meshes,
            self.cameras,
            self.materials,
            self.state_hash
        )
    }
}

/// Detailed info about a single node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInfo {
    pub id: NodeId,
    pub name: String,
    pub kind: &'static str,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub visible: bool,
    pub detail: String,
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} [{}] pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3}) {}",
            self.id,
            self.name,
            self.kind,
            self.position[0],
            self.position[1],
            self.position[2],
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
            self.detail,
        )?;
        if !self.visible {
            write!(f, " (hidden)")?;
        }
        Ok(())
    }
}
