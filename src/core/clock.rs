use std::time::Instant;

/// Read-and-reset monotonic stopwatch.
///
/// `tick` must be called exactly once per frame; each call consumes the
/// elapsed time since the previous call, so a second read in the same frame
/// would double-count.
#[derive(Debug)]
pub struct Stopwatch {
    last_tick: Instant,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Elapsed seconds since the last tick; resets the reference point.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    /// Reset the reference point without consuming the elapsed time.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
