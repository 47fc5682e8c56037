//! Reward shaping from changes of the shaping signal.
use serde::{Deserialize, Serialize};

/// Maps the shaping signals before and after an action to a scalar reward.
pub trait RewardShaper {
    /// Returns the reward of a step that moved the signal from `pre` to `post`.
    fn reward(&self, pre: f64, post: f64) -> f64;
}

/// Rewards reduction of the magnitude of the shaping signal.
///
/// The reward is positive when the step moved the system closer to its goal and
/// negative when it moved away. Dividing by the largest change a single step
/// can produce keeps rewards of different scenarios roughly within `[-1, 1]`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct DeltaReward {
    /// Normalizer of the signal change. Must be positive.
    pub scale: f64,
}

impl DeltaReward {
    /// Constructs the shaper.
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl RewardShaper for DeltaReward {
    fn reward(&self, pre: f64, post: f64) -> f64 {
        reward(pre, post, self.scale)
    }
}

/// `(|pre| - |post|) / scale`.
///
/// No guard against a zero `scale` or non-finite signals is done here; the
/// caller validates both.
pub fn reward(pre: f64, post: f64, scale: f64) -> f64 {
    (pre.abs() - post.abs()) / scale
}

/// Largest euclidean displacement of one step whose `dims` components are each
/// bounded by `component`, i.e. `sqrt(dims * component^2)`.
pub fn max_step_scale(component: f64, dims: usize) -> f64 {
    (dims as f64 * component * component).sqrt()
}
