use std::f32::consts::PI;

use glam::Vec3;
use lightlab_common::{Color, NodeId, Transform};
use lightlab_input::OrbitControls;
use lightlab_scene::light::{
    AmbientLight, DirectionalLight, HemisphereLight, PointLight, RectAreaLight, SpotLight,
};
use lightlab_scene::{
    Geometry, Helper, Light, MaterialHandle, Mesh, PerspectiveCamera, Scene, SceneError,
    StandardMaterial,
};
use lightlab_tools::DebugPanel;

use crate::clock::Clock;
use crate::config::DemoConfig;
use crate::driver::FrameDriver;
use crate::spin::Spinner;

/// Ids of the six demo lights.
#[derive(Debug, Clone, Copy)]
pub struct DemoLights {
    pub ambient: NodeId,
    pub directional: NodeId,
    pub hemisphere: NodeId,
    pub point: NodeId,
    pub rect_area: NodeId,
    pub spot: NodeId,
}

#[derive(Debug, Clone, Copy)]
pub struct DemoMeshes {
    pub sphere: NodeId,
    pub cube: NodeId,
    pub torus: NodeId,
    pub plane: NodeId,
}

/// The lighting demo: six lights with helpers, four primitives sharing one
/// material, and a perspective camera.
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub scene: Scene,
    pub camera: NodeId,
    pub lights: DemoLights,
    pub helpers: Vec<NodeId>,
    pub meshes: DemoMeshes,
    pub material: MaterialHandle,
    config: DemoConfig,
}

impl DemoScene {
    pub fn build(config: &DemoConfig) -> Result<Self, SceneError> {
        let mut scene = Scene::new();
        let at = Transform::from_position;

        let lights = DemoLights {
            ambient: scene.add(
                "ambient",
                Transform::default(),
                Light::from(AmbientLight::new(Color::from_hex(0xffffff), 1.0)),
            ),
            directional: scene.add(
                "directional",
                at(Vec3::new(1.0, 0.25, 0.0)),
                Light::from(DirectionalLight::new(Color::from_hex(0x00fffc), 0.9)),
            ),
            hemisphere: scene.add(
                "hemisphere",
                at(Vec3::Y),
                Light::from(HemisphereLight::new(
                    Color::from_hex(0xff0000),
                    Color::from_hex(0x0000ff),
                    0.9,
                )),
            ),
            point: scene.add(
                "point",
                at(Vec3::new(1.0, 0.0, 1.0)),
                Light::from(PointLight::new(Color::from_hex(0xff9000), 1.5)),
            ),
            rect_area: scene.add(
                "rect-area",
                at(Vec3::new(-1.5, 0.0, 1.5)),
                Light::from(RectAreaLight::new(Color::from_hex(0x4e00ff), 6.0, 1.0, 1.0)),
            ),
            spot: scene.add(
                "spot",
                at(Vec3::new(0.0, 2.0, 3.0)),
                Light::from(SpotLight::new(
                    Color::from_hex(0x78ff00),
                    4.5,
                    10.0,
                    PI * 0.1,
                    0.25,
                    1.0,
                )),
            ),
        };

        let mut helpers = Vec::new();
        for light_id in [
            lights.hemisphere,
            lights.directional,
            lights.point,
            lights.spot,
            lights.rect_area,
        ] {
            let light = *scene.light(light_id)?;
            let Some(helper) = Helper::for_light(light_id, &light, config.helpers.size) else {
                continue;
            };
            let name = format!("{}-helper", scene.get(light_id)?.name);
            let id = scene.add(name, Transform::default(), helper);
            scene.set_visible(id, config.helpers.visible)?;
            helpers.push(id);
        }

        let material = scene.add_material(
            StandardMaterial::default()
                .with_roughness(config.material.roughness)
                .with_metalness(config.material.metalness),
        );
        let mesh = |geometry| Mesh::new(geometry, material);
        let meshes = DemoMeshes {
            sphere: scene.add(
                "sphere",
                at(Vec3::new(-1.5, 0.0, 0.0)),
                mesh(Geometry::Sphere {
                    radius: 0.5,
                    width_segments: 32,
                    height_segments: 32,
                }),
            ),
            cube: scene.add(
                "cube",
                Transform::default(),
                mesh(Geometry::Box {
                    width: 0.75,
                    height: 0.75,
                    depth: 0.75,
                }),
            ),
            torus: scene.add(
                "torus",
                at(Vec3::new(1.5, 0.0, 0.0)),
                mesh(Geometry::Torus {
                    radius: 0.3,
                    tube: 0.2,
                    radial_segments: 32,
                    tubular_segments: 64,
                }),
            ),
            plane: scene.add(
                "plane",
                at(Vec3::new(0.0, -0.65, 0.0)).with_rotation(Vec3::new(-PI * 0.5, 0.0, 0.0)),
                mesh(Geometry::Plane {
                    width: 5.0,
                    height: 5.0,
                }),
            ),
        };

        let cam = &config.camera;
        let aspect = config.viewport.width as f32 / config.viewport.height.max(1) as f32;
        let camera = scene.add(
            "camera",
            at(cam.position),
            PerspectiveCamera::new(cam.fov_degrees, aspect, cam.near, cam.far),
        );

        tracing::debug!(nodes = scene.len(), "demo scene built");
        Ok(Self {
            scene,
            camera,
            lights,
            helpers,
            meshes,
            material,
            config: config.clone(),
        })
    }

    /// Spinners for the sphere, cube and torus. The plane stays put.
    pub fn spinners(&self) -> Vec<Spinner> {
        [self.meshes.sphere, self.meshes.cube, self.meshes.torus]
            .into_iter()
            .map(|node| Spinner::new(node, self.config.spin))
            .collect()
    }

    /// Intensity sliders for the ambient and directional lights.
    pub fn debug_panel(&self) -> DebugPanel {
        let mut panel = DebugPanel::new("Lights");
        panel
            .add_light_intensity(self.lights.ambient)
            .min(0.0)
            .max(1.0)
            .step(0.01)
            .name("AmbientLight-intensity");
        panel
            .add_light_intensity(self.lights.directional)
            .min(0.0)
            .max(1.0)
            .step(0.01)
            .name("DirectionalLight-intensity");
        panel
    }

    pub fn orbit_controls(&self) -> OrbitControls {
        OrbitControls::with_settings(Vec3::ZERO, self.config.controls)
            .with_fov(self.config.camera.fov_degrees)
    }

    /// Hand the scene to a frame driver with spinners and orbit controls attached.
    pub fn into_driver<C: Clock>(self, clock: C) -> FrameDriver<C> {
        let spinners = self.spinners();
        let controls = self.orbit_controls();
        FrameDriver::new(clock, self.scene, self.camera)
            .with_spinners(spinners)
            .with_controls(controls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn demo() -> DemoScene {
        DemoScene::build(&DemoConfig::default()).unwrap()
    }

    #[test]
    fn scene_has_every_part() {
        let d = demo();
        assert_eq!(d.scene.lights().count(), 6);
        assert_eq!(d.scene.helpers().count(), 5);
        assert_eq!(d.scene.meshes().count(), 4);
        assert_eq!(d.helpers.len(), 5);
        assert!(d.scene.camera(d.camera).is_ok());
    }

    #[test]
    fn lights_carry_demo_parameters() {
        let d = demo();
        let s = &d.scene;
        assert_eq!(s.light(d.lights.ambient).unwrap().intensity(), 1.0);
        assert_eq!(s.light(d.lights.directional).unwrap().color().to_hex(), 0x00fffc);
        assert_eq!(s.light(d.lights.rect_area).unwrap().intensity(), 6.0);
        let Light::Spot(spot) = s.light(d.lights.spot).unwrap() else {
            panic!("spot light expected");
        };
        assert_eq!(spot.distance, 10.0);
        assert!((spot.angle - PI * 0.1).abs() < 1e-6);
        assert_eq!(spot.penumbra, 0.25);
        assert_eq!(spot.decay, 1.0);
        assert_eq!(s.get(d.lights.spot).unwrap().transform.position, Vec3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn meshes_share_one_rough_material() {
        let d = demo();
        assert!(d.scene.meshes().all(|(_, m)| m.material == d.material));
        assert_eq!(d.scene.material(d.material).unwrap().roughness, 0.4);
    }

    #[test]
    fn plane_lies_flat_below_objects() {
        let d = demo();
        let t = d.scene.get(d.meshes.plane).unwrap().transform;
        assert_eq!(t.position.y, -0.65);
        assert!((t.rotation.x + PI * 0.5).abs() < 1e-6);
    }

    #[test]
    fn only_three_meshes_spin() {
        let d = demo();
        let nodes: Vec<NodeId> = d.spinners().iter().map(|s| s.node).collect();
        assert_eq!(nodes, [d.meshes.sphere, d.meshes.cube, d.meshes.torus]);
    }

    #[test]
    fn helpers_can_be_hidden() {
        let mut config = DemoConfig::default();
        config.helpers.visible = false;
        let d = DemoScene::build(&config).unwrap();
        assert!(d.scene.visible_helper_lines().is_empty());
        assert!(!demo().scene.visible_helper_lines().is_empty());
    }

    #[test]
    fn panel_has_two_intensity_sliders() {
        let mut d = demo();
        let panel = d.debug_panel();
        assert_eq!(panel.sliders().len(), 2);
        assert_eq!(panel.find("AmbientLight-intensity"), Some(0));
        panel.set(&mut d.scene, 1, 0.3).unwrap();
        let intensity = d.scene.light(d.lights.directional).unwrap().intensity();
        assert!((intensity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn camera_uses_config() {
        let d = demo();
        let cam = d.scene.camera(d.camera).unwrap();
        assert_eq!(cam.fov_degrees, 75.0);
        assert_eq!((cam.near, cam.far), (0.1, 100.0));
        assert!((cam.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn driver_gets_spinners_and_controls() {
        let mut driver = demo().into_driver(ManualClock::new());
        assert_eq!(driver.spinners().len(), 3);
        assert!(driver.controls_mut().is_some());
    }
}
