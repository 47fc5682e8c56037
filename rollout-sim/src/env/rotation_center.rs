//! Turning to face a target point.
use super::clip;
use crate::{World, WorldConfig};
use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use rollout_core::Env;
use serde::{Deserialize, Serialize};

/// Configuration of [`RotationCenter`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RotationCenterConfig {
    /// The world.
    pub world: WorldConfig,

    /// Turn in degrees of an action of `1`.
    pub max_turn: f64,
}

impl Default for RotationCenterConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            max_turn: 30.0,
        }
    }
}

/// A robot turning in place until the target is centered in front of it.
///
/// * Observation: `[heading_error / 180]`.
/// * Action: `[turn]` in `[-1, 1]`.
/// * Signal: heading error in degrees.
pub struct RotationCenter {
    config: RotationCenterConfig,
    world: World,
    rng: StdRng,
}

impl RotationCenter {
    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }
}

impl Env for RotationCenter {
    type Config = RotationCenterConfig;
    type Obs = Vec<f64>;
    type Act = Vec<f64>;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            world: World::new(config.world.clone()),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn reset(&mut self) -> Vec<f64> {
        self.world.place_robot_randomly(&mut self.rng);
        self.world.place_target_randomly(&mut self.rng);
        self.observe()
    }

    fn apply(&mut self, act: &Vec<f64>) {
        self.world.rotate(clip(act[0]) * self.config.max_turn);
    }

    fn observe(&self) -> Vec<f64> {
        vec![self.world.heading_error_to_target() / 180.0]
    }

    fn signal(&self) -> f64 {
        self.world.heading_error_to_target()
    }

    fn obs_dim(&self) -> usize {
        1
    }

    fn act_dim(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turning_towards_target() -> Result<()> {
        let mut env = RotationCenter::build(&RotationCenterConfig::default(), 2)?;
        env.reset();
        for _ in 0..20 {
            let error = env.observe()[0];
            // Turn by exactly the remaining error once it is small enough.
            let turn = (error * 180.0 / 30.0).clamp(-1.0, 1.0);
            env.apply(&vec![turn]);
        }
        assert!(env.signal().abs() < 1e-6);
        Ok(())
    }
}
