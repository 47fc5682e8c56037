//! Configuration of [`EpisodeRunner`](super::EpisodeRunner).
use crate::{error::RolloutError, ExplorationSchedule, TerminationConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`EpisodeRunner`](super::EpisodeRunner).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpisodeConfig {
    /// Hard cap on the number of reward-bearing steps of an episode.
    pub max_steps: usize,

    /// Number of unreinforced actions applied before every reward-bearing step,
    /// letting the effect of the policy show before the signal is measured.
    pub lead_in_steps: usize,

    /// Normalizer of the change of the shaping signal, see
    /// [`DeltaReward`](crate::DeltaReward).
    pub reward_scale: f64,

    /// Exploration schedule.
    pub exploration: ExplorationSchedule,

    /// Termination policy.
    pub termination: TerminationConfig,

    /// Wall-clock pause between steps in milliseconds. `0` disables pacing.
    pub pacing_millis: u64,

    /// If `true`, latencies of calls to the agent are measured.
    pub record_latency: bool,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            lead_in_steps: 0,
            reward_scale: 1.0,
            exploration: ExplorationSchedule::default(),
            termination: TerminationConfig::default(),
            pacing_millis: 0,
            record_latency: false,
        }
    }
}

impl EpisodeConfig {
    /// Sets the step cap.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the number of lead-in actions.
    pub fn lead_in_steps(mut self, v: usize) -> Self {
        self.lead_in_steps = v;
        self
    }

    /// Sets the reward normalizer.
    pub fn reward_scale(mut self, v: f64) -> Self {
        self.reward_scale = v;
        self
    }

    /// Sets the exploration schedule.
    pub fn exploration(mut self, v: ExplorationSchedule) -> Self {
        self.exploration = v;
        self
    }

    /// Sets the termination policy.
    pub fn termination(mut self, v: TerminationConfig) -> Self {
        self.termination = v;
        self
    }

    /// Sets the pause between steps.
    pub fn pacing_millis(mut self, v: u64) -> Self {
        self.pacing_millis = v;
        self
    }

    /// Enables or disables latency measurement.
    pub fn record_latency(mut self, v: bool) -> Self {
        self.record_latency = v;
        self
    }

    /// Checks the values of the configuration.
    pub fn validate(&self) -> Result<(), RolloutError> {
        if self.max_steps == 0 {
            return Err(RolloutError::InvalidConfig(
                "max_steps must be positive".to_string(),
            ));
        }
        if !(self.reward_scale > 0.0 && self.reward_scale.is_finite()) {
            return Err(RolloutError::InvalidConfig(format!(
                "reward_scale must be positive and finite, got {}",
                self.reward_scale
            )));
        }
        self.exploration.validate()?;
        self.termination.validate()
    }

    /// Constructs [`EpisodeConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EpisodeConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WindowSource;
    use tempdir::TempDir;

    #[test]
    fn test_serde_episode_config() -> Result<()> {
        let config = EpisodeConfig::default()
            .max_steps(500)
            .lead_in_steps(2)
            .reward_scale(28.28)
            .exploration(ExplorationSchedule::StepDecay {
                rate: 0.8,
                decay: 0.99,
            })
            .termination(TerminationConfig::RollingAverage {
                window: 5,
                threshold: 0.1,
                source: WindowSource::ActionNorm,
            });

        let dir = TempDir::new("episode_config")?;
        let path = dir.path().join("episode_config.yaml");
        config.save(&path)?;
        let config_ = EpisodeConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(EpisodeConfig::default().validate().is_ok());
        assert!(EpisodeConfig::default().max_steps(0).validate().is_err());
        assert!(EpisodeConfig::default().reward_scale(0.0).validate().is_err());
        assert!(EpisodeConfig::default()
            .reward_scale(f64::NAN)
            .validate()
            .is_err());
    }
}
