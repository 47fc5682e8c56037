//! Termination policies deciding when an episode has converged.
//!
//! A policy is fed one [`StepSignal`] after every reward-bearing step and is asked
//! whether the episode can stop. Hitting the step cap is handled by the
//! [`EpisodeRunner`](crate::EpisodeRunner), not by the policies, so a policy only
//! ever reports convergence.
mod rolling;
mod streak;
use crate::error::RolloutError;
pub use rolling::{RollingAverage, RollingWindow, WindowSource};
use serde::{Deserialize, Serialize};
pub use streak::SuccessStreak;

/// What a termination policy sees of a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSignal {
    /// Index of the step in the episode, starting at 0.
    pub step: usize,

    /// Shaping signal after the action was applied.
    pub signal: f64,

    /// Magnitude of the applied action.
    pub action_norm: f64,
}

/// Decides, from per-step signals, whether the current episode should end.
pub trait TerminationPolicy {
    /// Clears the state kept for the current episode.
    fn reset(&mut self);

    /// Feeds the signal of the step just taken.
    fn record(&mut self, signal: &StepSignal);

    /// Returns `true` if the episode has converged.
    fn should_stop(&self) -> bool;
}

/// A policy that never converges. Episodes run until the step cap.
#[derive(Debug, Default, Clone)]
pub struct Never;

impl TerminationPolicy for Never {
    fn reset(&mut self) {}

    fn record(&mut self, _signal: &StepSignal) {}

    fn should_stop(&self) -> bool {
        false
    }
}

/// Configuration of a termination policy.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum TerminationConfig {
    /// See [`SuccessStreak`].
    SuccessStreak {
        /// A step succeeds when the magnitude of its signal is below this value.
        threshold: f64,

        /// Number of consecutive successful steps needed to converge.
        target: usize,
    },

    /// See [`RollingAverage`].
    RollingAverage {
        /// Number of recent values averaged.
        window: usize,

        /// Convergence when the average is below this value.
        threshold: f64,

        /// Which value of a step enters the window.
        source: WindowSource,
    },

    /// See [`Never`].
    Never,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self::Never
    }
}

impl TerminationConfig {
    /// Builds the policy.
    pub fn build(&self) -> Box<dyn TerminationPolicy> {
        match *self {
            Self::SuccessStreak { threshold, target } => {
                Box::new(SuccessStreak::new(threshold, target))
            }
            Self::RollingAverage {
                window,
                threshold,
                source,
            } => Box::new(RollingAverage::new(window, threshold, source)),
            Self::Never => Box::new(Never),
        }
    }

    /// Checks that the window and the streak target are non-zero.
    pub fn validate(&self) -> Result<(), RolloutError> {
        match *self {
            Self::SuccessStreak { target: 0, .. } => Err(RolloutError::InvalidConfig(
                "success streak target must be positive".to_string(),
            )),
            Self::RollingAverage { window: 0, .. } => Err(RolloutError::InvalidConfig(
                "rolling window must hold at least one value".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never() {
        let mut policy = TerminationConfig::Never.build();
        for step in 0..100 {
            policy.record(&StepSignal {
                step,
                signal: 0.0,
                action_norm: 0.0,
            });
            assert!(!policy.should_stop());
        }
    }

    #[test]
    fn test_validate() {
        let c = TerminationConfig::SuccessStreak {
            threshold: 80.0,
            target: 0,
        };
        assert!(c.validate().is_err());
        let c = TerminationConfig::RollingAverage {
            window: 0,
            threshold: 1.0,
            source: WindowSource::Signal,
        };
        assert!(c.validate().is_err());
        assert!(TerminationConfig::default().validate().is_ok());
    }
}
