#![warn(missing_docs)]
//! Agents implementing [`rollout_core::Agent`].
//!
//! Every agent is built once from its configuration with
//! [`Configurable::build`](rollout_core::Configurable::build), including the way
//! it learns, and is not reconfigured afterwards.
pub mod boltzmann;
pub mod random;
pub use boltzmann::{action_grid, BoltzmannQ, BoltzmannQConfig, TdTarget};
pub use random::{RandomAgent, RandomAgentConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rollout_core::Configurable;
    use std::{fs::File, io::Write};
    use tempdir::TempDir;

    #[test]
    fn test_build_from_path() -> Result<()> {
        let config = BoltzmannQConfig::default()
            .td_target(TdTarget::Expected)
            .seed(3);
        let dir = TempDir::new("boltzmann_q")?;
        let path = dir.path().join("agent.yaml");
        File::create(&path)?.write_all(serde_yaml::to_string(&config)?.as_bytes())?;

        let agent = BoltzmannQ::build_from_path(&path)?;
        assert_eq!(agent.actions(), config.actions.as_slice());
        Ok(())
    }
}
