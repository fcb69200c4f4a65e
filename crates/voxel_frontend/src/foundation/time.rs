//! Interval timing for periodic UI callbacks

/// Accumulates frame deltas and reports when a fixed interval has elapsed
///
/// A long frame that spans several intervals still fires once; the
/// remainder carries over to the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTimer {
    interval: f32,
    elapsed: f32,
}

impl IntervalTimer {
    /// Create a timer firing every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Interval length in seconds
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Advance by `delta` seconds, returns true when the interval elapsed
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.interval <= 0.0 {
            return true;
        }
        self.elapsed += delta;
        if self.elapsed > self.interval {
            self.elapsed %= self.interval;
            true
        } else {
            false
        }
    }
}
