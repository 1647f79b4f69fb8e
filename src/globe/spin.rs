//! Automatic rotation clock with hover pause and a terminal stop.

/// Phase of the automatic spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinPhase {
    Spinning,
    PausedByHover,
    /// Entered on the first manual drag or zoom; never left.
    Stopped,
}

impl SpinPhase {
    pub fn label(self) -> &'static str {
        match self {
            SpinPhase::Spinning => "spinning",
            SpinPhase::PausedByHover => "paused",
            SpinPhase::Stopped => "stopped",
        }
    }
}

/// Elapsed-time bookkeeping. Running time before the last pause lives in
/// `accumulated_ms`; `start_ms` is set only while the clock runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpinClock {
    start_ms: Option<f64>,
    accumulated_ms: f64,
}

impl SpinClock {
    fn started_at(now_ms: f64) -> Self {
        Self {
            start_ms: Some(now_ms),
            accumulated_ms: 0.0,
        }
    }

    /// Total running time as of `now_ms`
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        match self.start_ms {
            Some(start) => self.accumulated_ms + (now_ms - start).max(0.0),
            None => self.accumulated_ms,
        }
    }

    fn freeze(&mut self, now_ms: f64) {
        self.accumulated_ms = self.elapsed(now_ms);
        self.start_ms = None;
    }

    fn resume(&mut self, now_ms: f64) {
        if self.start_ms.is_none() {
            self.start_ms = Some(now_ms);
        }
    }
}

/// Drives the yaw of the globe while spinning.
///
/// Yaw at any instant is `speed * elapsed - yaw_offset`, where `elapsed`
/// excludes paused time, so pausing and resuming never makes the globe jump.
#[derive(Clone, Debug)]
pub struct SpinScheduler {
    phase: SpinPhase,
    clock: SpinClock,
    speed: f64,
    yaw_offset: f64,
}

impl SpinScheduler {
    pub fn new(speed: f64, yaw_offset: f64, now_ms: f64) -> Self {
        Self {
            phase: SpinPhase::Spinning,
            clock: SpinClock::started_at(now_ms),
            speed,
            yaw_offset,
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Yaw for the clock's elapsed time at `now_ms`
    pub fn yaw_at(&self, now_ms: f64) -> f64 {
        self.speed * self.clock.elapsed(now_ms) - self.yaw_offset
    }

    /// Advance one animation frame. Returns the new yaw while spinning, in
    /// which case the caller must redraw exactly once.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        match self.phase {
            SpinPhase::Spinning => Some(self.yaw_at(now_ms)),
            SpinPhase::PausedByHover | SpinPhase::Stopped => None,
        }
    }

    /// Pointer entered a marker.
    pub fn hover_enter(&mut self, now_ms: f64) {
        if self.phase == SpinPhase::Spinning {
            self.clock.freeze(now_ms);
            self.phase = SpinPhase::PausedByHover;
            tracing::debug!(elapsed_ms = self.clock.accumulated_ms, "spin paused by hover");
        }
    }

    /// Pointer left a marker.
    pub fn hover_leave(&mut self, now_ms: f64) {
        if self.phase == SpinPhase::PausedByHover {
            self.clock.resume(now_ms);
            self.phase = SpinPhase::Spinning;
            tracing::debug!(elapsed_ms = self.clock.accumulated_ms, "spin resumed");
        }
    }

    /// A manual drag or zoom started. Irreversible.
    pub fn stop(&mut self, now_ms: f64) {
        if self.phase != SpinPhase::Stopped {
            self.clock.freeze(now_ms);
            self.phase = SpinPhase::Stopped;
            tracing::debug!("spin stopped by manual interaction");
        }
    }
}
