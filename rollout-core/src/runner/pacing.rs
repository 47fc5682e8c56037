//! Pacing between steps.
use std::{thread, time::Duration};

/// Hook invoked by the runner after every step.
///
/// Simulated runs don't need it. Runs driving real hardware use it to give
/// the robot time to move.
pub trait Pacer {
    /// Called once after every reward-bearing step.
    fn pause(&mut self);
}

/// Does nothing.
#[derive(Debug, Default, Clone)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self) {}
}

/// Sleeps the current thread for a fixed duration.
#[derive(Debug, Clone)]
pub struct SleepPacing(pub Duration);

impl Pacer for SleepPacing {
    fn pause(&mut self) {
        thread::sleep(self.0);
    }
}

/// Returns [`NoPacing`] for `0` and [`SleepPacing`] otherwise.
pub fn pacer_from_millis(millis: u64) -> Box<dyn Pacer> {
    match millis {
        0 => Box::new(NoPacing),
        ms => Box::new(SleepPacing(Duration::from_millis(ms))),
    }
}
