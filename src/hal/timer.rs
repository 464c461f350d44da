//! Timer Helpers
//!
//! Wall-clock helpers on top of the embassy time driver. Microsecond
//! busy-waits for the sweep come from `embassy_time::Delay`.

use embassy_time::{Duration, Instant};

/// Milliseconds since boot, truncated to 32 bits
#[must_use]
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Running lap timer, started on creation
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    since: Instant,
}

impl Stopwatch {
    /// Time since the last (re)start
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Instant::now() - self.since
    }

    /// Close the current lap and start the next one
    pub fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now - self.since;
        self.since = now;
        lap
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self {
            since: Instant::now(),
        }
    }
}

impl defmt::Format for Stopwatch {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} ms", self.elapsed().as_millis());
    }
}
