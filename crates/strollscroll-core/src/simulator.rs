//! Simulated step sensor.
//!
//! Stands in for a pedometer: every tick adds a small random increment to
//! today's count, capped a fixed distance past the daily goal. The caller
//! drives ticks (on a timer or in a loop) and feeds each reading to the
//! gamification engine.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

use crate::storage::SimulatorConfig;

/// Seeded generator for reproducible runs, entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> Mcg128Xsl64 {
    match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    }
}

pub struct StepSimulator<R> {
    config: SimulatorConfig,
    daily_goal: u32,
    steps: u32,
    running: bool,
    rng: R,
}

impl<R: Rng> StepSimulator<R> {
    pub fn new(config: SimulatorConfig, daily_goal: u32, rng: R) -> Self {
        let cap = daily_goal.saturating_add(config.overshoot);
        let steps = config.starting_steps.min(cap);
        Self {
            config,
            daily_goal,
            steps,
            running: true,
            rng,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Highest count the simulator will report.
    pub fn cap(&self) -> u32 {
        self.daily_goal.saturating_add(self.config.overshoot)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.config.interval_ms)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Flip between running and paused, returning the new running state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Midnight reset of today's count.
    pub fn reset_day(&mut self) {
        self.steps = 0;
    }

    /// Advance one interval. Returns the new reading, or `None` while paused.
    pub fn tick(&mut self) -> Option<u32> {
        if !self.running {
            return None;
        }
        let (low, high) = (self.config.min_increment, self.config.max_increment);
        let increment = if low >= high {
            low
        } else {
            self.rng.gen_range(low..=high)
        };
        self.steps = self.steps.saturating_add(increment).min(self.cap());
        Some(self.steps)
    }

    /// Run `ticks` intervals back to back and collect the readings.
    pub fn run_ticks(&mut self, ticks: usize) -> Vec<u32> {
        (0..ticks).filter_map(|_| self.tick()).collect()
    }
}
