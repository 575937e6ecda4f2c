//! Fixed-timestep clock for real-time hosts.
//!
//! The simulation itself only counts ticks. A host that runs against the
//! wall clock feeds elapsed time into a [`FixedClock`] and runs as many
//! [`Game::step`](crate::game::Game::step) calls as it reports, so the game
//! runs at the same speed regardless of frame rate.

use std::time::Duration;

use crate::config::TICK_RATE_HZ;

/// Accumulates wall-clock time and hands it out in whole ticks.
///
/// Steps owed in a single [`advance`](Self::advance) are capped; time beyond
/// the cap is dropped so a stalled host does not spiral into catch-up.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sidescroll_core::clock::FixedClock;
///
/// let mut clock = FixedClock::new(60);
/// assert_eq!(clock.advance(Duration::from_millis(10)), 0);
/// assert_eq!(clock.advance(Duration::from_millis(10)), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    step: Duration,
    accumulator: Duration,
    max_steps: u32,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(TICK_RATE_HZ)
    }
}

impl FixedClock {
    /// Default cap on steps returned by one `advance`.
    pub const DEFAULT_MAX_STEPS: u32 = 5;

    /// Creates a clock ticking `rate_hz` times per second.
    #[must_use]
    pub fn new(rate_hz: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / rate_hz.max(1),
            accumulator: Duration::ZERO,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Sets the catch-up cap.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Duration of one tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Time banked toward the next tick.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Adds `elapsed` and returns how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulator >= self.step {
            self.accumulator = Duration::ZERO;
        }
        steps
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}
