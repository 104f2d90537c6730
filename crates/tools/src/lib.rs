//! Developer Tooling: tweakable debug panel and scene inspector.
//!
//! # Invariants
//! - The inspector is read-only.
//! - Panel writes go through the scene's typed accessors and are range-checked.

pub mod inspector;
pub mod panel;

pub use inspector::{NodeInfo, SceneInspector, SceneSummary};
pub use panel::{DebugPanel, PanelError, Slider, SliderBinding, SliderBuilder};
