//! Reaching a target point.
use super::clip;
use crate::{Vec2, World, WorldConfig};
use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use rollout_core::Env;
use serde::{Deserialize, Serialize};

/// Configuration of [`PointSeek`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PointSeekConfig {
    /// The world.
    pub world: WorldConfig,

    /// Displacement in pixels of an action component of `1`.
    pub component: f64,
}

impl Default for PointSeekConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            component: 20.0,
        }
    }
}

/// A holonomic robot that has to reach a randomly placed target.
///
/// * Observation: unit vector from the robot to the target, `[0, 0]` when the
///   robot is on the target.
/// * Action: `[dx, dy]` in `[-1, 1]`.
/// * Signal: distance to the target.
pub struct PointSeek {
    config: PointSeekConfig,
    world: World,
    rng: StdRng,
}

impl PointSeek {
    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }
}

impl Env for PointSeek {
    type Config = PointSeekConfig;
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
        let c = self.config.component;
        self.world
            .translate(Vec2::new(clip(act[0]) * c, clip(act[1]) * c));
    }

    fn observe(&self) -> Vec<f64> {
        let d = self.world.displacement_to_target();
        let norm = d.norm();
        if norm > 0.0 {
            vec![d.x / norm, d.y / norm]
        } else {
            vec![0.0, 0.0]
        }
    }

    fn signal(&self) -> f64 {
        self.world.distance_to_target()
    }

    fn obs_dim(&self) -> usize {
        2
    }

    fn act_dim(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_is_unit_or_zero() -> Result<()> {
        let mut env = PointSeek::build(&PointSeekConfig::default(), 11)?;
        let obs = env.reset();
        assert!((obs[0].hypot(obs[1]) - 1.0).abs() < 1e-9);

        env.world.robot.position = env.world.target;
        assert_eq!(env.observe(), vec![0.0, 0.0]);
        assert_eq!(env.signal(), 0.0);
        Ok(())
    }

    #[test]
    fn test_following_observation_reduces_distance() -> Result<()> {
        let mut env = PointSeek::build(&PointSeekConfig::default(), 5)?;
        let mut obs = env.reset();
        let start = env.signal();
        for _ in 0..10 {
            env.apply(&obs);
            obs = env.observe();
        }
        assert!(env.signal() < start || env.signal() < 20.0);
        Ok(())
    }
}
