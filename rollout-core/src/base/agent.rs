//! Agent.
use super::{Env, Policy};

/// Represents a learning policy on an environment.
///
/// The episode runner is the only caller of an agent. It calls [`Agent::reset`]
/// once at the start of every episode, then alternates
/// [`Policy::choose_action`] and [`Agent::apply_reinforcement`].
pub trait Agent<E: Env>: Policy<E> {
    /// Clears the episode-scoped internal trace.
    fn reset(&mut self);

    /// Updates internal estimates with the reward of the action returned by the
    /// immediately preceding [`Policy::choose_action`] call.
    ///
    /// `obs` is the observation made after that action was applied.
    /// This method is called at most once per chosen action.
    fn apply_reinforcement(&mut self, reward: f64, obs: &E::Obs);

    /// Dimensionality of the observations the agent was configured for.
    fn obs_dim(&self) -> usize;

    /// Dimensionality of the actions the agent emits.
    fn act_dim(&self) -> usize;
}
