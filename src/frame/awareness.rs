//! Wake-up sequence driving the awareness level.

use std::time::{Duration, Instant};

/// Minimum time between two wake-up stages.
pub const DEFAULT_STAGE_INTERVAL: Duration = Duration::from_millis(200);

/// Staged ramp of the awareness level from 0 to 1.
#[derive(Debug, Clone)]
pub struct WakeupSequence {
    stages: u32,
    current: u32,
    interval: Duration,
    last_advance: Instant,
}

impl WakeupSequence {
    pub fn new(stages: u32) -> Self {
        Self::with_interval(stages, DEFAULT_STAGE_INTERVAL)
    }

    pub fn with_interval(stages: u32, interval: Duration) -> Self {
        Self {
            stages,
            current: 0,
            interval,
            last_advance: Instant::now(),
        }
    }

    /// Move to the next stage. Returns `false` once every stage is done.
    pub fn advance(&mut self) -> bool {
        if self.current < self.stages {
            self.current += 1;
            log::debug!("Wakeup stage {}/{}", self.current, self.stages);
            true
        } else {
            false
        }
    }

    /// Advance if the stage interval has elapsed since the last step.
    ///
    /// Returns `true` while the sequence is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_advance) >= self.interval {
            self.last_advance = now;
            if !self.advance() {
                return false;
            }
        }
        !self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.stages
    }

    /// Awareness in [0, 1]: the fraction of completed stages.
    pub fn level(&self) -> f32 {
        if self.stages == 0 {
            return 1.0;
        }
        self.current as f32 / self.stages as f32
    }

    pub fn stage(&self) -> u32 {
        self.current
    }
}
