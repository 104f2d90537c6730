//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - Output resolution derives from the [`Viewport`], never from the window directly.

mod error;
mod renderer;
mod viewport;

pub use error::RenderError;
pub use renderer::{DebugTextRenderer, Renderer};
pub use viewport::Viewport;
