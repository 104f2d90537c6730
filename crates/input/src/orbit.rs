use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use lightlab_common::Transform;
use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Smallest polar angle the camera may reach; keeps it off the poles where
/// the look-at basis degenerates.
const POLAR_EPSILON: f32 = 1e-6;
/// Camera motion below this is reported as "unchanged".
const CHANGE_EPSILON: f32 = 1e-6;
/// Distance ratio applied per zoom step (0.95 per wheel step).
const ZOOM_BASE: f32 = 0.95;

/// Tuning for [`OrbitControls`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update when damping.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }
}

/// Orbit a camera around a target point.
///
/// Input accumulates as a pending spherical delta (azimuth `theta`, polar
/// `phi`), a zoom scale and a pan offset. [`OrbitControls::update`] applies
/// them to the camera transform. With damping enabled only a
/// `damping_factor` share of the pending rotation and pan is applied per
/// update and the rest decays by `1 - damping_factor`, so motion eases out
/// over the following frames.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub settings: OrbitSettings,
    pub enabled: bool,
    /// Vertical field of view of the controlled camera, for pan scaling.
    fov_degrees: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    /// Pan in viewport heights, converted to world units at update time.
    pending_pan: Vec2,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self::with_settings(target, OrbitSettings::default())
    }

    pub fn with_settings(target: Vec3, settings: OrbitSettings) -> Self {
        Self {
            target,
            settings,
            enabled: true,
            fov_degrees: 50.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            pending_pan: Vec2::ZERO,
        }
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    /// Queue an action. `viewport_height` is in the same pixels as the
    /// action's deltas.
    pub fn handle(&mut self, action: Action, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let height = viewport_height.max(1.0);
        let s = self.settings;
        match action {
            Action::Orbit { dx, dy } => {
                self.pending_theta -= TAU * dx / height * s.rotate_speed;
                self.pending_phi -= TAU * dy / height * s.rotate_speed;
            }
            Action::Zoom(steps) => {
                self.pending_scale *= ZOOM_BASE.powf(steps * s.zoom_speed);
            }
            Action::Pan { dx, dy } => {
                self.pending_pan += Vec2::new(dx, dy) / height * s.pan_speed;
            }
            Action::Noop => {}
        }
    }

    /// True while queued motion remains to be applied.
    pub fn is_settling(&self) -> bool {
        self.pending_theta.abs() > CHANGE_EPSILON
            || self.pending_phi.abs() > CHANGE_EPSILON
            || (self.pending_scale - 1.0).abs() > CHANGE_EPSILON
            || self.pending_pan.length() > CHANGE_EPSILON
    }

    /// Apply pending motion to `camera` and point it at the target.
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Transform) -> bool {
        let before = *camera;
        let s = self.settings;
        let step = if s.enable_damping { s.damping_factor } else { 1.0 };

        if self.pending_pan != Vec2::ZERO {
            let offset = camera.position - self.target;
            let half_fov = (self.fov_degrees.to_radians() * 0.5).tan();
            let world_per_height = 2.0 * offset.length() * half_fov;
            let q = camera.rotation_quat();
            let right = q * Vec3::X;
            let up = q * Vec3::Y;
            let pan = self.pending_pan * step;
            self.target += (-right * pan.x + up * pan.y) * world_per_height;
            camera.position += (-right * pan.x + up * pan.y) * world_per_height;
        }

        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI * 0.5)
        };

        theta += self.pending_theta * step;
        phi += self.pending_phi * step;
        let min_phi = s.min_polar_angle.max(POLAR_EPSILON);
        let max_phi = s.max_polar_angle.min(PI - POLAR_EPSILON);
        phi = phi.clamp(min_phi, max_phi.max(min_phi));

        radius = (radius * self.pending_scale).clamp(s.min_distance, s.max_distance.max(s.min_distance));

        let sin_phi = phi.sin() * radius;
        let offset = Vec3::new(sin_phi * theta.sin(), phi.cos() * radius, sin_phi * theta.cos());
        camera.position = self.target + offset;
        camera.look_at(self.target, Vec3::Y);

        if s.enable_damping {
            let decay = 1.0 - s.damping_factor;
            self.pending_theta *= decay;
            self.pending_phi *= decay;
            self.pending_pan *= decay;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
            self.pending_pan = Vec2::ZERO;
        }
        self.pending_scale = 1.0;

        let moved = camera.position.distance_squared(before.position) > CHANGE_EPSILON
            || (camera.rotation - before.rotation).length_squared() > CHANGE_EPSILON;
        if moved {
            tracing::trace!(position = ?camera.position, "orbit camera moved");
        }
        moved
    }
}
