//! Following a straight line.
use super::clip;
use crate::{Vec2, World, WorldConfig};
use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use rollout_core::Env;
use serde::{Deserialize, Serialize};

/// Configuration of [`LineFollowDrive`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct LineFollowDriveConfig {
    /// The world.
    pub world: WorldConfig,

    /// Motor power of an action component of `1`.
    pub motor_scale: f64,

    /// Pixels per tick of a wheel at full power.
    pub speed: f64,

    /// Ticks the motors run per action.
    pub ticks: usize,
}

impl Default for LineFollowDriveConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            motor_scale: 100.0,
            speed: 2.0,
            ticks: 20,
        }
    }
}

/// A differential-drive robot that has to get onto the line.
///
/// * Observation: `[is_left_of_line, rotation / 360]`.
/// * Action: `[left, right]` motor powers in `[-1, 1]`.
/// * Signal: signed distance from the line.
pub struct LineFollowDrive {
    config: LineFollowDriveConfig,
    world: World,
    rng: StdRng,
}

impl LineFollowDrive {
    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }
}

impl Env for LineFollowDrive {
    type Config = LineFollowDriveConfig;
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
        self.observe()
    }

    fn apply(&mut self, act: &Vec<f64>) {
        let scale = self.config.motor_scale;
        self.world.set_motors(
            clip(act[0]) * scale,
            clip(act[1]) * scale,
            self.config.speed,
            self.config.ticks,
        );
    }

    fn observe(&self) -> Vec<f64> {
        vec![
            self.world.is_left_of_line() as u8 as f64,
            self.world.robot.rotation / 360.0,
        ]
    }

    fn signal(&self) -> f64 {
        self.world.distance_from_line()
    }

    fn obs_dim(&self) -> usize {
        2
    }

    fn act_dim(&self) -> usize {
        2
    }
}

/// Configuration of [`LineFollowHolo`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct LineFollowHoloConfig {
    /// The world.
    pub world: WorldConfig,

    /// Displacement in pixels of an action component of `1`.
    pub component: f64,
}

impl Default for LineFollowHoloConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            component: 20.0,
        }
    }
}

/// A holonomic robot that moves by displacements and has to get onto the line.
///
/// * Observation: `[is_left_of_line]`.
/// * Action: `[dx, dy]` in `[-1, 1]`.
/// * Signal: signed distance from the line.
pub struct LineFollowHolo {
    config: LineFollowHoloConfig,
    world: World,
    rng: StdRng,
}

impl LineFollowHolo {
    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }
}

impl Env for LineFollowHolo {
    type Config = LineFollowHoloConfig;
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
        self.observe()
    }

    fn apply(&mut self, act: &Vec<f64>) {
        let c = self.config.component;
        self.world
            .translate(Vec2::new(clip(act[0]) * c, clip(act[1]) * c));
    }

    fn observe(&self) -> Vec<f64> {
        vec![self.world.is_left_of_line() as u8 as f64]
    }

    fn signal(&self) -> f64 {
        self.world.distance_from_line()
    }

    fn obs_dim(&self) -> usize {
        1
    }

    fn act_dim(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holo_moves_towards_line() -> Result<()> {
        let mut env = LineFollowHolo::build(&LineFollowHoloConfig::default(), 0)?;
        env.reset();
        let pre = env.signal();
        // Left of the line means below it in screen coordinates: move up.
        let dy = if env.observe()[0] == 1.0 { -1.0 } else { 1.0 };
        env.apply(&vec![0.0, dy]);
        let post = env.signal();
        assert!(post.abs() < pre.abs() || pre.abs() < 20.0);
        Ok(())
    }

    #[test]
    fn test_holo_action_is_clipped() -> Result<()> {
        let mut env = LineFollowHolo::build(&LineFollowHoloConfig::default(), 0)?;
        let start = env.world().robot.position;
        env.apply(&vec![5.0, 0.0]);
        assert_eq!(env.world().robot.position.x, start.x + 20.0);
        Ok(())
    }

    #[test]
    fn test_drive_observation() -> Result<()> {
        let mut env = LineFollowDrive::build(&LineFollowDriveConfig::default(), 3)?;
        let obs = env.reset();
        assert_eq!(obs.len(), env.obs_dim());
        assert!(obs[0] == 0.0 || obs[0] == 1.0);
        assert!((0.0..1.0).contains(&obs[1]));
        env.apply(&vec![1.0, 1.0]);
        assert_eq!(env.observe().len(), 2);
        Ok(())
    }
}
