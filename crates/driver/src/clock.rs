use std::time::Instant;

/// Source of elapsed time in seconds.
///
/// Implementations must be monotonic: a read never returns less than the
/// read before it.
pub trait Clock {
    fn elapsed(&mut self) -> f64;
}

/// Wall clock backed by [`Instant`].
///
/// Starts on the first read, which returns `0.0`. It is never reset or paused.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    start: Option<Instant>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&mut self) -> f64 {
        self.start.get_or_insert_with(Instant::now).elapsed().as_secs_f64()
    }
}

/// Deterministic clock for tests and headless runs.
///
/// Time only moves through [`ManualClock::advance`], [`ManualClock::set`] or
/// the optional per-read step, and never backwards.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
    step: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that advances by `dt` after every read, so successive frames
    /// see `0, dt, 2*dt, ...`.
    pub fn stepping(dt: f64) -> Self {
        Self {
            now: 0.0,
            step: sanitize(dt),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn advance(&mut self, dt: f64) {
        let dt = sanitize(dt);
        self.now += dt;
    }

    /// Jump to `t`. Earlier times are ignored.
    pub fn set(&mut self, t: f64) {
        if t < self.now || !t.is_finite() {
            tracing::warn!(requested = t, now = self.now, "manual clock cannot move backwards");
            return;
        }
        self.now = t;
    }
}

impl Clock for ManualClock {
    fn elapsed(&mut self) -> f64 {
        let t = self.now;
        self.now += self.step;
        t
    }
}

fn sanitize(dt: f64) -> f64 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        tracing::warn!(dt, "ignoring negative or non-finite time step");
        0.0
    }
}
