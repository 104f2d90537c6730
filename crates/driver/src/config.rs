use std::path::Path;

use glam::Vec3;
use lightlab_input::OrbitSettings;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spin::SpinRate;

/// Demo settings. Every field has a default, so a config file only needs to
/// name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub spin: SpinRate,
    pub camera: CameraConfig,
    pub controls: OrbitSettings,
    pub viewport: ViewportConfig,
    pub helpers: HelperConfig,
    pub material: MaterialConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    pub max_pixel_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    pub visible: bool,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            spin: SpinRate::default(),
            camera: CameraConfig::default(),
            controls: OrbitSettings {
                enable_damping: true,
                ..OrbitSettings::default()
            },
            viewport: ViewportConfig::default(),
            helpers: HelperConfig::default(),
            material: MaterialConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(1.0, 1.0, 2.0),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            max_pixel_ratio: 2.0,
        }
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            visible: true,
            size: 0.2,
        }
    }
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            roughness: 0.4,
            metalness: 0.0,
        }
    }
}

impl DemoConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.camera;
        if !(c.fov_degrees > 0.0 && c.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                c.fov_degrees
            )));
        }
        if !(c.near > 0.0 && c.far > c.near) {
            return Err(ConfigError::Invalid(format!(
                "camera planes need 0 < near < far, got near={} far={}",
                c.near, c.far
            )));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid("viewport size must be non-zero".into()));
        }
        if !(self.viewport.max_pixel_ratio > 0.0) {
            return Err(ConfigError::Invalid(
                "viewport.max_pixel_ratio must be positive".into(),
            ));
        }
        let d = self.controls.damping_factor;
        if self.controls.enable_damping && !(d > 0.0 && d <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "controls.damping_factor must be in (0, 1], got {d}"
            )));
        }
        Ok(())
    }
}
