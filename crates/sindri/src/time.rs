//! Frame clock and countdown timers.
//!
//! [`Clock`] measures the inter-frame delta time the engine feeds into
//! [`World::update`](crate::ecs::World::update). [`Timer`] is the small
//! countdown utility gameplay code leans on for cooldowns, fades, and
//! scheduled effects — tick it once per frame with the same `dt`.

use std::time::Instant;

/// Measures wall-clock time between frames.
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    /// Start the clock. The first [`Clock::tick`] measures from here.
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Returns the seconds elapsed since the previous tick (or since
    /// construction) and restarts the measurement. Never negative.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        dt
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// A countdown from a fixed period, driven by per-frame delta time.
///
/// The timer latches: once it reaches zero, [`Timer::has_ticked`] stays true
/// until [`Timer::reset`].
#[derive(Debug, Clone)]
pub struct Timer {
    period: f32,
    counter: f32,
    has_ticked: bool,
    running: bool,
}

impl Timer {
    /// A timer that ticks after `period` seconds of accumulated updates.
    pub fn new(period: f32) -> Self {
        Self {
            period,
            counter: period,
            has_ticked: false,
            running: true,
        }
    }

    /// Advance the countdown. Must be called once per frame, otherwise the
    /// timer simply stands still.
    pub fn update(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        self.counter -= dt;
        if self.counter <= 0.0 {
            self.has_ticked = true;
        }
    }

    /// Whether the countdown has finished.
    pub fn has_ticked(&self) -> bool {
        self.has_ticked
    }

    /// The raw remaining-time value. Can go negative if updates keep coming
    /// after the tick.
    pub fn value(&self) -> f32 {
        self.counter
    }

    /// Overwrite the remaining time (not the period).
    pub fn set_value(&mut self, value: f32) {
        self.counter = value;
    }

    /// Stop consuming delta time until [`Timer::resume`].
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Rewind to the full period and clear the ticked latch.
    pub fn reset(&mut self) {
        self.counter = self.period;
        self.has_ticked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_after_period_elapses() {
        let mut timer = Timer::new(1.0);
        timer.update(0.4);
        assert!(!timer.has_ticked());
        timer.update(0.4);
        assert!(!timer.has_ticked());
        timer.update(0.4);
        assert!(timer.has_ticked());
    }

    #[test]
    fn tick_latches_until_reset() {
        let mut timer = Timer::new(0.5);
        timer.update(1.0);
        assert!(timer.has_ticked());
        timer.update(0.0);
        assert!(timer.has_ticked());

        timer.reset();
        assert!(!timer.has_ticked());
        assert_eq!(timer.value(), 0.5);
    }

    #[test]
    fn paused_timer_stands_still() {
        let mut timer = Timer::new(1.0);
        timer.pause();
        timer.update(5.0);
        assert!(!timer.has_ticked());
        assert_eq!(timer.value(), 1.0);

        timer.resume();
        timer.update(5.0);
        assert!(timer.has_ticked());
    }

    #[test]
    fn set_value_overrides_remaining_time() {
        let mut timer = Timer::new(10.0);
        timer.set_value(0.1);
        timer.update(0.2);
        assert!(timer.has_ticked());
    }

    #[test]
    fn clock_measures_nonnegative_dt() {
        let mut clock = Clock::new();
        let dt = clock.tick();
        assert!(dt >= 0.0);
    }
}
