//! Exploration schedules.
use crate::error::RolloutError;
use serde::{Deserialize, Serialize};

/// Produces the exploration value handed to
/// [`Policy::choose_action`](crate::Policy::choose_action) at every step.
///
/// A schedule is a pure function of the step and episode indices. It knows
/// nothing about how the agent interprets the value.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum ExplorationSchedule {
    /// The same value at every step of every episode.
    Constant {
        /// Exploration value.
        rate: f64,
    },

    /// Multiplicative decay over the steps of an episode, restarting at every
    /// episode. The value is decayed once before its first use, so step `t`
    /// gets `rate * decay^(t + 1)`.
    StepDecay {
        /// Value at the start of an episode.
        rate: f64,

        /// Factor applied at every step.
        decay: f64,
    },

    /// Multiplicative decay over episodes, bounded from below.
    /// Episode `k` gets `max(rate * decay^k, min)` at all of its steps.
    EpisodeDecay {
        /// Value in the first episode.
        rate: f64,

        /// Factor applied at every episode.
        decay: f64,

        /// Lower bound.
        min: f64,
    },
}

/// Exponent of a decay for a step or episode index, saturating at `i32::MAX`.
fn exponent(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

impl Default for ExplorationSchedule {
    fn default() -> Self {
        Self::Constant { rate: 0.2 }
    }
}

impl ExplorationSchedule {
    /// Returns the exploration value at step `step` of episode `episode`.
    pub fn exploration_at(&self, step: usize, episode: usize) -> f64 {
        match *self {
            Self::Constant { rate } => rate,
            Self::StepDecay { rate, decay } => rate * decay.powi(exponent(step.saturating_add(1))),
            Self::EpisodeDecay { rate, decay, min } => {
                (rate * decay.powi(exponent(episode))).max(min)
            }
        }
    }

    /// Checks that rates are non-negative and decay factors lie in `(0, 1]`.
    pub fn validate(&self) -> Result<(), RolloutError> {
        let (rate, decay) = match *self {
            Self::Constant { rate } => (rate, 1.0),
            Self::StepDecay { rate, decay } => (rate, decay),
            Self::EpisodeDecay { rate, decay, min } => {
                if !(min >= 0.0) {
                    return Err(RolloutError::InvalidConfig(format!(
                        "exploration lower bound must be non-negative, got {}",
                        min
                    )));
                }
                (rate, decay)
            }
        };
        if !(rate >= 0.0 && rate.is_finite()) {
            return Err(RolloutError::InvalidConfig(format!(
                "exploration rate must be non-negative, got {}",
                rate
            )));
        }
        if !(decay > 0.0 && decay <= 1.0) {
            return Err(RolloutError::InvalidConfig(format!(
                "exploration decay must be in (0, 1], got {}",
                decay
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let s = ExplorationSchedule::Constant { rate: 0.2 };
        assert_eq!(s.exploration_at(0, 0), 0.2);
        assert_eq!(s.exploration_at(999, 42), 0.2);
    }

    #[test]
    fn test_step_decay_restarts_every_episode() {
        let s = ExplorationSchedule::StepDecay {
            rate: 0.8,
            decay: 0.99,
        };
        let first = s.exploration_at(0, 0);
        assert!((first - 0.8 * 0.99).abs() < 1e-12);
        assert!((s.exploration_at(2, 0) - 0.8 * 0.99f64.powi(3)).abs() < 1e-12);
        assert_eq!(s.exploration_at(0, 7), first);
        assert!(s.exploration_at(10, 0) < s.exploration_at(9, 0));
    }

    #[test]
    fn test_episode_decay_floor() {
        let s = ExplorationSchedule::EpisodeDecay {
            rate: 1.0,
            decay: 0.5,
            min: 0.1,
        };
        assert_eq!(s.exploration_at(100, 0), 1.0);
        assert_eq!(s.exploration_at(0, 1), 0.5);
        assert_eq!(s.exploration_at(0, 10), 0.1);
    }

    #[test]
    fn test_validate() {
        assert!(ExplorationSchedule::default().validate().is_ok());
        assert!(ExplorationSchedule::Constant { rate: -1.0 }.validate().is_err());
        assert!(ExplorationSchedule::StepDecay {
            rate: 0.8,
            decay: 1.5
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_decay_is_monotone_for_huge_indices() {
        let s = ExplorationSchedule::StepDecay {
            rate: 0.8,
            decay: 0.99,
        };
        let late = s.exploration_at(usize::MAX, 0);
        assert!(late <= s.exploration_at(1000, 0));
        assert!(late >= 0.0);
        assert!(s.exploration_at(i32::MAX as usize, 0) <= s.exploration_at(1000, 0));

        let s = ExplorationSchedule::EpisodeDecay {
            rate: 1.0,
            decay: 0.5,
            min: 0.1,
        };
        assert_eq!(s.exploration_at(0, usize::MAX), 0.1);
    }
}
