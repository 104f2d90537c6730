//! Frame Driver: advances time-driven scene state once per frame and hands
//! the scene to a renderer.
//!
//! # Invariants
//! - Elapsed time seen by the driver never decreases.
//! - Spinner rotations are a pure function of elapsed time, so re-applying
//!   the same time yields the same transforms.
//! - The driver owns all per-run state; there are no globals.

pub mod clock;
pub mod config;
pub mod demo;
pub mod driver;
pub mod error;
pub mod spin;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::DemoConfig;
pub use demo::DemoScene;
pub use driver::{FrameDriver, FrameInfo};
pub use error::{ConfigError, DriverError};
pub use spin::{SpinRate, Spinner};
pub use timer::FrameTimer;
