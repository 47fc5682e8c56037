//! Configuration of [`BoltzmannQ`](super::BoltzmannQ).
use rollout_core::error::RolloutError;
use serde::{Deserialize, Serialize};

/// Bootstrap target of the temporal-difference update.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub enum TdTarget {
    /// Value of the best action in the next state (Q-learning).
    Max,

    /// Value of the next state expected under the Boltzmann policy at the
    /// temperature of the last choice (expected SARSA).
    Expected,
}

/// Configuration of [`BoltzmannQ`](super::BoltzmannQ).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct BoltzmannQConfig {
    /// Lower bounds of observation components.
    pub obs_low: Vec<f64>,

    /// Upper bounds of observation components.
    pub obs_high: Vec<f64>,

    /// Number of bins per observation component.
    pub bins: usize,

    /// Enumerated action set.
    pub actions: Vec<Vec<f64>>,

    /// Step size of the update.
    pub learning_rate: f64,

    /// Discount factor.
    pub discount: f64,

    /// Bootstrap target.
    pub td_target: TdTarget,

    /// Seed of action sampling.
    pub seed: u64,
}

impl Default for BoltzmannQConfig {
    fn default() -> Self {
        Self {
            obs_low: vec![0.0],
            obs_high: vec![1.0],
            bins: 2,
            actions: action_grid(2, 3, -1.0, 1.0),
            learning_rate: 0.4,
            discount: 0.95,
            td_target: TdTarget::Max,
            seed: 42,
        }
    }
}

impl BoltzmannQConfig {
    /// Sets the bounds of observations.
    pub fn obs_bounds(mut self, low: Vec<f64>, high: Vec<f64>) -> Self {
        self.obs_low = low;
        self.obs_high = high;
        self
    }

    /// Sets the number of bins per observation component.
    pub fn bins(mut self, v: usize) -> Self {
        self.bins = v;
        self
    }

    /// Sets the action set.
    pub fn actions(mut self, v: Vec<Vec<f64>>) -> Self {
        self.actions = v;
        self
    }

    /// Sets the learning rate.
    pub fn learning_rate(mut self, v: f64) -> Self {
        self.learning_rate = v;
        self
    }

    /// Sets the discount factor.
    pub fn discount(mut self, v: f64) -> Self {
        self.discount = v;
        self
    }

    /// Sets the bootstrap target.
    pub fn td_target(mut self, v: TdTarget) -> Self {
        self.td_target = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Checks the consistency of the configuration.
    pub fn validate(&self) -> Result<(), RolloutError> {
        if self.obs_low.is_empty() || self.obs_low.len() != self.obs_high.len() {
            return Err(RolloutError::InvalidConfig(format!(
                "observation bounds must be non-empty and of equal length, got {} and {}",
                self.obs_low.len(),
                self.obs_high.len()
            )));
        }
        if self
            .obs_low
            .iter()
            .zip(self.obs_high.iter())
            .any(|(lo, hi)| !(lo < hi))
        {
            return Err(RolloutError::InvalidConfig(
                "every observation lower bound must be below its upper bound".to_string(),
            ));
        }
        if self.bins == 0 {
            return Err(RolloutError::InvalidConfig(
                "bins must be positive".to_string(),
            ));
        }
        let act_dim = match self.actions.first() {
            Some(a) if !a.is_empty() => a.len(),
            _ => {
                return Err(RolloutError::InvalidConfig(
                    "the action set must hold at least one non-empty action".to_string(),
                ))
            }
        };
        if self.actions.iter().any(|a| a.len() != act_dim) {
            return Err(RolloutError::InvalidConfig(
                "all actions must have the same dimensionality".to_string(),
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(RolloutError::InvalidConfig(format!(
                "learning rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(RolloutError::InvalidConfig(format!(
                "discount must be in [0, 1], got {}",
                self.discount
            )));
        }
        Ok(())
    }
}

/// All actions of `dims` components, each taking `per_dim` evenly spaced
/// values from `low` to `high`.
///
/// ```
/// use rollout_agent::action_grid;
///
/// let actions = action_grid(2, 3, -1.0, 1.0);
/// assert_eq!(actions.len(), 9);
/// assert_eq!(actions[0], vec![-1.0, -1.0]);
/// assert_eq!(actions[8], vec![1.0, 1.0]);
/// ```
pub fn action_grid(dims: usize, per_dim: usize, low: f64, high: f64) -> Vec<Vec<f64>> {
    let values: Vec<f64> = match per_dim {
        0 => vec![],
        1 => vec![(low + high) / 2.0],
        n => (0..n)
            .map(|i| low + (high - low) * i as f64 / (n - 1) as f64)
            .collect(),
    };
    (0..dims).fold(vec![vec![]], |acc, _| {
        acc.iter()
            .flat_map(|prefix| {
                values.iter().map(move |v| {
                    let mut a: Vec<f64> = prefix.clone();
                    a.push(*v);
                    a
                })
            })
            .collect()
    })
}
