//! wgpu render backend for the lighting demo.
//!
//! Draws every visible mesh lit by up to [`MAX_LIGHTS`] scene lights, then the
//! light helpers as line lists, into an offscreen target sized by the
//! [`Viewport`](lightlab_render::Viewport). The target is blitted to the
//! surface at the end of the frame.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - GPU meshes are cached per node and rebuilt only when the geometry changes.

mod gpu;
mod lights;
mod shaders;

pub use gpu::{SurfaceFrame, WgpuRenderer};
pub use lights::{FrameLights, GpuLight, LightKind, MAX_LIGHTS, pack_lights};
