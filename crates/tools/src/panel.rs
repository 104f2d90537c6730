use lightlab_common::NodeId;
use lightlab_scene::{Scene, SceneError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("no slider at index {0}")]
    SliderNotFound(usize),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Scene property a slider reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderBinding {
    LightIntensity(NodeId),
}

/// A numeric control bound to one scene property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    pub name: String,
    pub min: f32,
    pub max: f32,
    /// Snap increment; zero means continuous.
    pub step: f32,
    pub binding: SliderBinding,
}

impl Slider {
    /// Clamp `value` to the range and snap it to the step grid anchored at `min`.
    pub fn constrain(&self, value: f32) -> f32 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let mut v = value.clamp(lo, hi);
        if self.step > 0.0 {
            v = lo + ((v - lo) / self.step).round() * self.step;
            v = v.clamp(lo, hi);
        }
        v
    }
}

/// Chained configuration for the slider most recently added to a panel.
pub struct SliderBuilder<'a> {
    slider: &'a mut Slider,
}

impl SliderBuilder<'_> {
    pub fn min(self, min: f32) -> Self {
        self.slider.min = min;
        self
    }

    pub fn max(self, max: f32) -> Self {
        self.slider.max = max;
        self
    }

    pub fn step(self, step: f32) -> Self {
        self.slider.step = step.max(0.0);
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.slider.name = name.into();
        self
    }
}

/// A titled list of sliders.
///
/// The panel stores bindings, not values: reads and writes go straight to the
/// scene, so a value changed elsewhere shows up on the next read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugPanel {
    pub title: String,
    sliders: Vec<Slider>,
}

impl DebugPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sliders: Vec::new(),
        }
    }

    /// Add a slider for a light's intensity. Defaults to `0..=1`, continuous.
    pub fn add_light_intensity(&mut self, light: NodeId) -> SliderBuilder<'_> {
        self.sliders.push(Slider {
            name: "intensity".to_string(),
            min: 0.0,
            max: 1.0,
            step: 0.0,
            binding: SliderBinding::LightIntensity(light),
        });
        let index = self.sliders.len() - 1;
        SliderBuilder {
            slider: &mut self.sliders[index],
        }
    }

    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.sliders.iter().position(|s| s.name == name)
    }

    fn slider(&self, index: usize) -> Result<&Slider, PanelError> {
        self.sliders
            .get(index)
            .ok_or(PanelError::SliderNotFound(index))
    }

    /// Current value of the bound property.
    pub fn value(&self, scene: &Scene, index: usize) -> Result<f32, PanelError> {
        match self.slider(index)?.binding {
            SliderBinding::LightIntensity(id) => Ok(scene.light(id)?.intensity()),
        }
    }

    /// Write `value` to the bound property after clamping and snapping.
    /// Returns the value actually stored.
    pub fn set(&self, scene: &mut Scene, index: usize, value: f32) -> Result<f32, PanelError> {
        let slider = self.slider(index)?;
        let applied = slider.constrain(value);
        if applied != value {
            tracing::debug!(slider = %slider.name, requested = value, applied, "slider value constrained");
        }
        match slider.binding {
            SliderBinding::LightIntensity(id) => scene.light_mut(id)?.set_intensity(applied),
        }
        Ok(applied)
    }
}
