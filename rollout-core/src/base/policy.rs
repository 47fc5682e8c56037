//! Policy.
use super::Env;
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action, parameterized by an
/// exploration value. By convention a higher exploration value makes the
/// choice more random. Some policies read it as a Boltzmann temperature,
/// others as a probability; the caller does not depend on either reading.
pub trait Policy<E: Env> {
    /// Chooses an action given an observation.
    fn choose_action(&mut self, obs: &E::Obs, exploration: f64) -> E::Act;
}

/// A configurable object, having type parameter.
///
/// Everything that determines the behavior of the object, including how it
/// learns, is given in the configuration at construction.
pub trait Configurable {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    fn build(config: Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Build the object with the configuration in the yaml file of the given path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let file = std::fs::File::open(path)?;
        let rdr = std::io::BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Self::build(config)
    }
}
