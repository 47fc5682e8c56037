//! Core functionalities.
mod agent;
mod env;
mod policy;
pub use agent::Agent;
pub use env::Env;
pub use policy::{Configurable, Policy};
use std::fmt::Debug;

/// An observation of an environment at a decision point.
///
/// The length of an observation is fixed for the lifetime of a scenario and
/// must match the input dimensionality of the agent.
pub trait Obs: Clone + Debug {
    /// Returns the number of elements in the observation.
    fn len(&self) -> usize;
}

/// An action applied to an environment.
pub trait Act: Clone + Debug {
    /// Returns the number of elements in the action.
    fn len(&self) -> usize;

    /// Euclidean magnitude of the action.
    ///
    /// Used by termination policies that watch how much the agent still moves.
    fn norm(&self) -> f64;
}

impl Obs for Vec<f64> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl Act for Vec<f64> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn norm(&self) -> f64 {
        self.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}
