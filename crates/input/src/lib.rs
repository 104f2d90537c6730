//! Camera input: windowing events become [`Action`]s, and [`OrbitControls`]
//! turn actions into camera motion.
//!
//! # Invariants
//! - Controls never touch the camera outside of `update`.
//! - The camera keeps looking at the orbit target after every update.

pub mod action;
pub mod orbit;

pub use action::{Action, PointerButton};
pub use orbit::{OrbitControls, OrbitSettings};
