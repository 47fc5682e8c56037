//! Uniformly random agent.
use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rollout_core::{error::RolloutError, Agent, Configurable, Env, Policy};
use serde::{Deserialize, Serialize};

/// Configuration of [`RandomAgent`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RandomAgentConfig {
    /// Dimensionality of observations.
    pub obs_dim: usize,

    /// Dimensionality of actions.
    pub act_dim: usize,

    /// Lower bound of action components.
    pub low: f64,

    /// Upper bound of action components.
    pub high: f64,

    /// Random seed.
    pub seed: u64,
}

impl Default for RandomAgentConfig {
    fn default() -> Self {
        Self {
            obs_dim: 1,
            act_dim: 2,
            low: -1.0,
            high: 1.0,
            seed: 42,
        }
    }
}

/// Takes uniformly random actions and learns nothing. A baseline for scenarios.
pub struct RandomAgent {
    config: RandomAgentConfig,
    rng: StdRng,
}

impl Configurable for RandomAgent {
    type Config = RandomAgentConfig;

    fn build(config: Self::Config) -> Result<Self> {
        if !(config.low < config.high) {
            return Err(RolloutError::InvalidConfig(format!(
                "action bounds must satisfy low < high, got [{}, {}]",
                config.low, config.high
            ))
            .into());
        }
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }
}

impl<E> Policy<E> for RandomAgent
where
    E: Env<Obs = Vec<f64>, Act = Vec<f64>>,
{
    fn choose_action(&mut self, _obs: &Vec<f64>, _exploration: f64) -> Vec<f64> {
        (0..self.config.act_dim)
            .map(|_| self.rng.gen_range(self.config.low..self.config.high))
            .collect()
    }
}

impl<E> Agent<E> for RandomAgent
where
    E: Env<Obs = Vec<f64>, Act = Vec<f64>>,
{
    fn reset(&mut self) {}

    fn apply_reinforcement(&mut self, _reward: f64, _obs: &Vec<f64>) {}

    fn obs_dim(&self) -> usize {
        self.config.obs_dim
    }

    fn act_dim(&self) -> usize {
        self.config.act_dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollout_core::dummy::ConstantEnv;

    #[test]
    fn test_actions_in_bounds() -> Result<()> {
        let mut agent = RandomAgent::build(RandomAgentConfig::default())?;
        for _ in 0..100 {
            let act = Policy::<ConstantEnv>::choose_action(&mut agent, &vec![0.0], 1.0);
            assert_eq!(act.len(), 2);
            assert!(act.iter().all(|v| (-1.0..1.0).contains(v)));
        }
        Ok(())
    }

    #[test]
    fn test_invalid_bounds() {
        let config = RandomAgentConfig {
            low: 1.0,
            high: 1.0,
            ..Default::default()
        };
        assert!(RandomAgent::build(config).is_err());
    }
}
