use std::fmt::Write;

use lightlab_common::NodeId;
use lightlab_scene::{NodeKind, Scene};

use crate::error::RenderError;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer draws the scene as seen from the camera node. It never mutates
/// the scene; per-frame state (GPU caches, counters) lives in the renderer.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, scene: &Scene, camera: NodeId) -> Result<Self::Output, RenderError>;
}

/// Produces a human-readable listing of the scene.
///
/// Used by the headless CLI and for testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &Scene, camera: NodeId) -> Result<String, RenderError> {
        let cam = scene.camera(camera)?;
        let eye = scene.get(camera)?.transform.position;
        self.frames += 1;

        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "=== Frame {} ({} nodes) ===", self.frames, scene.len());
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
            eye.x, eye.y, eye.z, cam.fov_degrees, cam.aspect
        );

        for node in scene.nodes().iter().filter(|n| n.visible) {
            let t = &node.transform;
            match &node.kind {
                NodeKind::Light(light) => {
                    let _ = writeln!(
                        out,
                        "  {} {:<16} {} intensity={:.2}",
                        node.id,
                        node.name,
                        light.kind_name(),
                        light.intensity()
                    );
                }
                NodeKind::Mesh(mesh) => {
                    let _ = writeln!(
                        out,
                        "  {} {:<16} {} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3})",
                        node.id,
                        node.name,
                        mesh.geometry.name(),
                        t.position.x,
                        t.position.y,
                        t.position.z,
                        t.rotation.x,
                        t.rotation.y,
                        t.rotation.z
                    );
                }
                NodeKind::Helper(_) | NodeKind::Camera(_) => {}
            }
        }

        tracing::trace!(frame = self.frames, bytes = out.len(), "debug text rendered");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use lightlab_common::{Color, Transform};
    use lightlab_scene::light::AmbientLight;
    use lightlab_scene::{Geometry, Light, Mesh, PerspectiveCamera, SceneError, StandardMaterial};

    fn scene_with_camera() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let cam = scene.add(
            "camera",
            Transform::from_position(Vec3::new(1.0, 1.0, 2.0)),
            PerspectiveCamera::new(75.0, 1.5, 0.1, 100.0),
        );
        (scene, cam)
    }

    #[test]
    fn debug_renderer_empty_scene() {
        let (scene, cam) = scene_with_camera();
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, cam).unwrap();

        assert!(output.contains("Frame 1 (1 nodes)"));
        assert!(output.contains("fov=75"));
        assert_eq!(renderer.frames_rendered(), 1);
    }

    #[test]
    fn debug_renderer_lists_meshes_and_lights() {
        let (mut scene, cam) = scene_with_camera();
        let m = scene.add_material(StandardMaterial::default());
        scene.add(
            "cube",
            Transform::default().with_rotation(Vec3::new(1.5, 1.0, 0.0)),
            Mesh::new(
                Geometry::Box {
                    width: 1.0,
                    height: 1.0,
                    depth: 1.0,
                },
                m,
            ),
        );
        scene.add(
            "ambient",
            Transform::default(),
            Light::from(AmbientLight::new(Color::WHITE, 0.5)),
        );

        let output = DebugTextRenderer::new().render(&scene, cam).unwrap();
        assert!(output.contains("box"));
        assert!(output.contains("rot=(1.500, 1.000, 0.000)"));
        assert!(output.contains("AmbientLight intensity=0.50"));
    }

    #[test]
    fn missing_camera_is_an_error() {
        let (scene, _) = scene_with_camera();
        let err = DebugTextRenderer::new().render(&scene, NodeId(7)).unwrap_err();
        assert!(matches!(err, RenderError::Scene(SceneError::NodeNotFound(NodeId(7)))));
    }
}
