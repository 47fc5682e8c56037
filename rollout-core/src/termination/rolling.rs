use super::{StepSignal, TerminationPolicy};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which value of a step enters a [`RollingWindow`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub enum WindowSource {
    /// Magnitude of the shaping signal.
    Signal,

    /// Magnitude of the applied action.
    ActionNorm,
}

/// Fixed-capacity buffer of the most recent values.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    /// Constructs an empty window.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a value, dropping the oldest one when the window is full.
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Returns `true` when the window holds `capacity` values.
    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the window holds no value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean of the values held, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
        }
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Converges when the average of the last `window` values drops below a threshold.
///
/// Nothing is decided before the window is full, whatever the average of the
/// partial window is.
#[derive(Debug, Clone)]
pub struct RollingAverage {
    window: RollingWindow,
    threshold: f64,
    source: WindowSource,
}

impl RollingAverage {
    /// Constructs the policy.
    pub fn new(window: usize, threshold: f64, source: WindowSource) -> Self {
        Self {
            window: RollingWindow::new(window),
            threshold,
            source,
        }
    }

    /// The window of recent values.
    pub fn window(&self) -> &RollingWindow {
        &self.window
    }
}

impl TerminationPolicy for RollingAverage {
    fn reset(&mut self) {
        self.window.clear();
    }

    fn record(&mut self, signal: &StepSignal) {
        let value = match self.source {
            WindowSource::Signal => signal.signal.abs(),
            WindowSource::ActionNorm => signal.action_norm,
        };
        self.window.push(value);
    }

    fn should_stop(&self) -> bool {
        if !self.window.is_full() {
            return false;
        }
        match self.window.mean() {
            Some(mean) => mean < self.threshold,
            None => false,
        }
    }
}
