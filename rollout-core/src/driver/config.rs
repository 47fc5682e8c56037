//! Configuration of [`ExperimentDriver`](super::ExperimentDriver).
use crate::{error::RolloutError, EpisodeConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ExperimentDriver`](super::ExperimentDriver).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DriverConfig {
    /// Number of episodes of a run.
    pub n_episodes: usize,

    /// If `true`, the records of every step are written to the recorder in
    /// addition to the records of every episode.
    pub record_steps: bool,

    /// Configuration of each episode.
    pub episode: EpisodeConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            n_episodes: 100,
            record_steps: false,
            episode: EpisodeConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Sets the number of episodes.
    pub fn n_episodes(mut self, v: usize) -> Self {
        self.n_episodes = v;
        self
    }

    /// Enables or disables per-step records.
    pub fn record_steps(mut self, v: bool) -> Self {
        self.record_steps = v;
        self
    }

    /// Sets the configuration of episodes.
    pub fn episode(mut self, v: EpisodeConfig) -> Self {
        self.episode = v;
        self
    }

    /// Checks the values of the configuration.
    pub fn validate(&self) -> Result<(), RolloutError> {
        if self.n_episodes == 0 {
            return Err(RolloutError::InvalidConfig(
                "n_episodes must be positive".to_string(),
            ));
        }
        self.episode.validate()
    }

    /// Constructs [`DriverConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DriverConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
