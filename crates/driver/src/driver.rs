use std::time::Duration;

use lightlab_common::NodeId;
use lightlab_input::OrbitControls;
use lightlab_render::Renderer;
use lightlab_scene::Scene;

use crate::clock::Clock;
use crate::error::DriverError;
use crate::spin::Spinner;
use crate::timer::FrameTimer;

/// Timing of one driven frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Zero-based frame index.
    pub number: u64,
    /// Seconds since the clock started.
    pub elapsed: f64,
    /// Seconds since the previous frame (zero for the first).
    pub delta: f64,
}

/// Owns everything a frame needs: the clock, the scene, the camera handle
/// and the time-driven spinners.
///
/// The host calls [`FrameDriver::tick`] once per redraw, or hands control to
/// [`FrameDriver::run`] with a stop condition.
#[derive(Debug)]
pub struct FrameDriver<C: Clock> {
    clock: C,
    scene: Scene,
    camera: NodeId,
    spinners: Vec<Spinner>,
    controls: Option<OrbitControls>,
    timer: FrameTimer,
    frame: u64,
    last_elapsed: f64,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(clock: C, scene: Scene, camera: NodeId) -> Self {
        Self {
            clock,
            scene,
            camera,
            spinners: Vec::new(),
            controls: None,
            timer: FrameTimer::default(),
            frame: 0,
            last_elapsed: 0.0,
        }
    }

    pub fn with_spinners(mut self, spinners: impl IntoIterator<Item = Spinner>) -> Self {
        self.spinners.extend(spinners);
        self
    }

    pub fn with_controls(mut self, controls: OrbitControls) -> Self {
        self.controls = Some(controls);
        self
    }

    pub fn add_spinner(&mut self, spinner: Spinner) {
        self.spinners.push(spinner);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for UI edits between frames.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> NodeId {
        self.camera
    }

    pub fn spinners(&self) -> &[Spinner] {
        &self.spinners
    }

    pub fn controls_mut(&mut self) -> Option<&mut OrbitControls> {
        self.controls.as_mut()
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Frames completed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Drive one frame: read the clock, spin tracked nodes, let the orbit
    /// controls move the camera, then render.
    pub fn tick<R: Renderer>(&mut self, renderer: &mut R) -> Result<(FrameInfo, R::Output), DriverError> {
        let _span = tracing::info_span!("frame_tick", frame = self.frame).entered();

        let mut elapsed = self.clock.elapsed();
        if elapsed.is_nan() || elapsed < self.last_elapsed {
            tracing::warn!(elapsed, last = self.last_elapsed, "clock went backwards; holding time");
            elapsed = self.last_elapsed;
        }
        let delta = if self.frame == 0 { 0.0 } else { elapsed - self.last_elapsed };

        for spinner in &self.spinners {
            spinner.apply(&mut self.scene, elapsed)?;
        }

        if let Some(controls) = self.controls.as_mut() {
            let camera = self.scene.transform_mut(self.camera)?;
            controls.update(camera);
        }

        let output = renderer.render(&self.scene, self.camera)?;

        let info = FrameInfo {
            number: self.frame,
            elapsed,
            delta,
        };
        self.frame += 1;
        self.last_elapsed = elapsed;
        self.timer
            .record(Duration::try_from_secs_f64(delta).unwrap_or_default());
        tracing::trace!(number = info.number, elapsed, delta, "frame complete");

        Ok((info, output))
    }

    /// Tick until `should_continue` returns false or a frame fails.
    ///
    /// The predicate sees the number of frames this call has completed and is
    /// checked before every frame. Returns that count.
    pub fn run<R, P>(&mut self, renderer: &mut R, should_continue: P) -> Result<u64, DriverError>
    where
        R: Renderer,
        P: FnMut(u64) -> bool,
    {
        self.run_with(renderer, should_continue, |_, _| {})
    }

    /// Like [`FrameDriver::run`], handing each frame's output to `on_frame`.
    pub fn run_with<R, P, F>(
        &mut self,
        renderer: &mut R,
        mut should_continue: P,
        mut on_frame: F,
    ) -> Result<u64, DriverError>
    where
        R: Renderer,
        P: FnMut(u64) -> bool,
        F: FnMut(&FrameInfo, R::Output),
    {
        let mut completed = 0;
        while should_continue(completed) {
            let (info, output) = self.tick(renderer)?;
            on_frame(&info, output);
            completed += 1;
        }
        tracing::debug!(frames = completed, "run finished");
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::spin::SpinRate;
    use glam::Vec3;
    use lightlab_common::Transform;
    use lightlab_render::RenderError;
    use lightlab_scene::{Geometry, Mesh, PerspectiveCamera, SceneError, StandardMaterial};

    /// Records the Y rotation of node 0 each time it renders.
    #[derive(Default)]
    struct Probe {
        seen: Vec<f32>,
        fail_at: Option<usize>,
    }

    impl Renderer for Probe {
        type Output = usize;

        fn render(&mut self, scene: &Scene, _camera: NodeId) -> Result<usize, RenderError> {
            if self.fail_at == Some(self.seen.len()) {
                return Err(RenderError::Backend("probe failure".into()));
            }
            self.seen.push(scene.get(NodeId(0))?.transform.rotation.y);
            Ok(self.seen.len())
        }
    }

    fn driver(clock: ManualClock) -> FrameDriver<ManualClock> {
        let mut scene = Scene::new();
        let m = scene.add_material(StandardMaterial::default());
        let cube = scene.add(
            "cube",
            Transform::default(),
            Mesh::new(
                Geometry::Box {
                    width: 1.0,
                    height: 1.0,
                    depth: 1.0,
                },
                m,
            ),
        );
        let cam = scene.add(
            "camera",
            Transform::from_position(Vec3::new(1.0, 1.0, 2.0)),
            PerspectiveCamera::default(),
        );
        FrameDriver::new(clock, scene, cam).with_spinners([Spinner::new(cube, SpinRate::default())])
    }

    #[test]
    fn tick_spins_then_renders() {
        let mut d = driver(ManualClock::new());
        d.clock_mut().set(10.0);
        let mut probe = Probe::default();
        let (info, out) = d.tick(&mut probe).unwrap();
        assert_eq!(info.number, 0);
        assert_eq!(info.elapsed, 10.0);
        assert_eq!(out, 1);
        assert!((probe.seen[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn frame_info_tracks_delta() {
        let mut d = driver(ManualClock::stepping(0.5));
        let mut probe = Probe::default();
        let infos: Vec<FrameInfo> = (0..3).map(|_| d.tick(&mut probe).unwrap().0).collect();
        assert_eq!(infos[0].delta, 0.0);
        assert_eq!(infos[1].delta, 0.5);
        assert_eq!(infos[2].elapsed, 1.0);
        assert_eq!(d.frame_count(), 3);
        assert_eq!(d.timer().count(), 3);
    }

    #[test]
    fn run_stops_when_predicate_is_false() {
        let mut d = driver(ManualClock::stepping(1.0 / 60.0));
        let mut probe = Probe::default();
        let frames = d.run(&mut probe, |n| n < 5).unwrap();
        assert_eq!(frames, 5);
        assert_eq!(probe.seen.len(), 5);
        // Rendered rotations follow the clock.
        assert!(probe.seen.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn run_with_false_predicate_renders_nothing() {
        let mut d = driver(ManualClock::new());
        let mut probe = Probe::default();
        assert_eq!(d.run(&mut probe, |_| false).unwrap(), 0);
        assert!(probe.seen.is_empty());
    }

    #[test]
    fn render_failure_stops_run() {
        let mut d = driver(ManualClock::stepping(0.1));
        let mut probe = Probe {
            fail_at: Some(2),
            ..Probe::default()
        };
        let err = d.run(&mut probe, |_| true).unwrap_err();
        assert!(matches!(err, DriverError::Render(RenderError::Backend(_))));
        assert_eq!(d.frame_count(), 2);
    }

    #[test]
    fn run_with_hands_out_every_frame() {
        let mut d = driver(ManualClock::stepping(0.1));
        let mut probe = Probe::default();
        let mut numbers = Vec::new();
        d.run_with(&mut probe, |n| n < 3, |info, _| numbers.push(info.number))
            .unwrap();
        assert_eq!(numbers, [0, 1, 2]);
    }

    #[test]
    fn controls_orient_camera_before_render() {
        let mut d = driver(ManualClock::new()).with_controls(OrbitControls::new(Vec3::ZERO));
        d.tick(&mut Probe::default()).unwrap();
        let cam = d.scene().get(d.camera()).unwrap().transform;
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!(cam.forward().distance(expected) < 1e-4);
    }

    #[test]
    fn missing_spinner_target_is_reported() {
        let mut d = driver(ManualClock::new());
        d.add_spinner(Spinner::new(NodeId(50), SpinRate::default()));
        let err = d.tick(&mut Probe::default()).unwrap_err();
        assert!(matches!(err, DriverError::Scene(SceneError::NodeNotFound(NodeId(50)))));
    }
}
