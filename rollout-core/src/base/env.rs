//! Environment.
use super::{Act, Obs};
use anyhow::Result;

/// Represents a controllable environment.
///
/// The environment exposes two views of its state: the observation fed to the
/// agent, and a scalar shaping signal (e.g. a distance to a goal) from which
/// rewards and termination decisions are derived.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Builds an environment with a given random seed.
    ///
    /// All random placements of the environment are drawn from a source
    /// seeded with `seed`.
    fn build(config: &Self::Config, seed: u64) -> Result<Self>
    where
        Self: Sized;

    /// Re-places the controlled entity (and its target, if any) and returns
    /// the initial observation.
    fn reset(&mut self) -> Self::Obs;

    /// Advances the environment with the given action.
    fn apply(&mut self, act: &Self::Act);

    /// Returns the current observation.
    fn observe(&self) -> Self::Obs;

    /// Returns the current shaping signal.
    fn signal(&self) -> f64;

    /// Dimensionality of observations.
    fn obs_dim(&self) -> usize;

    /// Dimensionality of actions.
    fn act_dim(&self) -> usize;
}
