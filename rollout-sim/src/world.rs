//! Geometry of the simulated world.
//!
//! The world is a rectangle `[0, width] x [0, height]` in pixels with the y-axis
//! pointing down. It holds one straight line to follow, one robot and one target
//! point. Rotations are in degrees, `0` facing `+x`.
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point or a displacement in the world.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy, Default)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,

    /// Vertical component.
    pub y: f64,
}

impl Vec2 {
    /// Constructs a vector.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// z-component of the cross product.
    pub fn cross(&self, other: &Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Multiplies both components.
    pub fn scale(&self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Infinite straight line through two distinct points.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct Line {
    /// First point.
    pub a: Vec2,

    /// Second point.
    pub b: Vec2,
}

impl Line {
    /// Perpendicular distance of `p` to the line, positive on the left side
    /// when looking from `a` to `b`.
    pub fn signed_distance(&self, p: Vec2) -> f64 {
        let d = self.b - self.a;
        d.cross(&(p - self.a)) / d.norm()
    }
}

/// Pose of the robot.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy, Default)]
pub struct Robot {
    /// Position in pixels.
    pub position: Vec2,

    /// Heading in degrees, in `[0, 360)`.
    pub rotation: f64,
}

/// Configuration of [`World`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct WorldConfig {
    /// Width in pixels.
    pub width: f64,

    /// Height in pixels.
    pub height: f64,

    /// The line to follow.
    pub line: Line,

    /// Distance between the wheels of the robot in pixels.
    pub wheel_base: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            line: Line {
                a: Vec2::new(0.0, 300.0),
                b: Vec2::new(900.0, 300.0),
            },
            wheel_base: 20.0,
        }
    }
}

/// Wraps an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// The simulated world.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,

    /// The robot.
    pub robot: Robot,

    /// The target point.
    pub target: Vec2,
}

impl World {
    /// Constructs a world with the robot at its center facing `+x` and the
    /// target at the origin.
    pub fn new(config: WorldConfig) -> Self {
        let center = Vec2::new(config.width / 2.0, config.height / 2.0);
        Self {
            config,
            robot: Robot {
                position: center,
                rotation: 0.0,
            },
            target: Vec2::default(),
        }
    }

    /// Configuration of the world.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.gen_range(0.0..self.config.width),
            rng.gen_range(0.0..self.config.height),
        )
    }

    /// Places the robot at a uniformly random position and heading.
    pub fn place_robot_randomly(&mut self, rng: &mut impl Rng) {
        self.robot.position = self.random_point(rng);
        self.robot.rotation = rng.gen_range(0.0..360.0);
        debug!(
            "Robot placed at ({:.1}, {:.1}) facing {:.1}",
            self.robot.position.x, self.robot.position.y, self.robot.rotation
        );
    }

    /// Places the target at a uniformly random position.
    pub fn place_target_randomly(&mut self, rng: &mut impl Rng) {
        self.target = self.random_point(rng);
        debug!("Target placed at ({:.1}, {:.1})", self.target.x, self.target.y);
    }

    fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(0.0, self.config.width),
            p.y.clamp(0.0, self.config.height),
        )
    }

    /// Signed distance of the robot to the line, see [`Line::signed_distance`].
    pub fn distance_from_line(&self) -> f64 {
        self.config.line.signed_distance(self.robot.position)
    }

    /// `true` if the robot is on the left side of the line.
    pub fn is_left_of_line(&self) -> bool {
        self.distance_from_line() > 0.0
    }

    /// Moves the robot by a displacement, keeping it inside the world.
    pub fn translate(&mut self, d: Vec2) {
        self.robot.position = self.clamp(self.robot.position + d);
    }

    /// Turns the robot in place.
    pub fn rotate(&mut self, deg: f64) {
        self.robot.rotation = (self.robot.rotation + deg).rem_euclid(360.0);
    }

    /// Drives the robot as a differential drive for `ticks` ticks.
    ///
    /// Motor powers are in `[-100, 100]`; a wheel at full power moves `speed`
    /// pixels per tick.
    pub fn set_motors(&mut self, left: f64, right: f64, speed: f64, ticks: usize) {
        let vl = left.clamp(-100.0, 100.0) / 100.0 * speed;
        let vr = right.clamp(-100.0, 100.0) / 100.0 * speed;
        let forward = (vl + vr) / 2.0;
        let turn = ((vr - vl) / self.config.wheel_base).to_degrees();
        for _ in 0..ticks {
            let heading = self.robot.rotation.to_radians();
            self.translate(Vec2::new(heading.cos(), heading.sin()).scale(forward));
            self.rotate(turn);
        }
    }

    /// Distance from the robot to the target.
    pub fn distance_to_target(&self) -> f64 {
        (self.target - self.robot.position).norm()
    }

    /// Displacement from the robot to the target.
    pub fn displacement_to_target(&self) -> Vec2 {
        self.target - self.robot.position
    }

    /// Angle in degrees the robot has to turn to face the target, in `(-180, 180]`.
    pub fn heading_error_to_target(&self) -> f64 {
        let d = self.displacement_to_target();
        wrap_degrees(d.y.atan2(d.x).to_degrees() - self.robot.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_line_distance_sign() {
        let mut world = World::new(WorldConfig::default());
        // Line along y = 300 from left to right; y points down, so "left" is below.
        world.robot.position = Vec2::new(100.0, 380.0);
        assert_eq!(world.distance_from_line(), 80.0);
        assert!(world.is_left_of_line());
        world.robot.position = Vec2::new(100.0, 250.0);
        assert_eq!(world.distance_from_line(), -50.0);
        assert!(!world.is_left_of_line());
    }

    #[test]
    fn test_translate_is_clamped() {
        let mut world = World::new(WorldConfig::default());
        world.translate(Vec2::new(1000.0, -1000.0));
        assert_eq!(world.robot.position, Vec2::new(900.0, 0.0));
    }

    #[test]
    fn test_motors() {
        let mut world = World::new(WorldConfig::default());
        let start = world.robot.position;
        world.set_motors(100.0, 100.0, 2.0, 10);
        assert!((world.robot.position.x - (start.x + 20.0)).abs() < 1e-9);
        assert_eq!(world.robot.rotation, 0.0);

        world.set_motors(-100.0, 100.0, 2.0, 1);
        assert!(world.robot.rotation > 0.0);
        assert!((world.robot.position.x - (start.x + 20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_heading_error() {
        let mut world = World::new(WorldConfig::default());
        world.robot.position = Vec2::new(100.0, 100.0);
        world.robot.rotation = 0.0;
        world.target = Vec2::new(100.0, 200.0);
        assert!((world.heading_error_to_target() - 90.0).abs() < 1e-9);
        world.robot.rotation = 270.0;
        assert!((world.heading_error_to_target() - 180.0).abs() < 1e-9);
        assert_eq!(wrap_degrees(-190.0), 170.0);
    }

    #[test]
    fn test_random_placement_is_seeded() {
        let mut w1 = World::new(WorldConfig::default());
        let mut w2 = World::new(WorldConfig::default());
        w1.place_robot_randomly(&mut StdRng::seed_from_u64(7));
        w2.place_robot_randomly(&mut StdRng::seed_from_u64(7));
        assert_eq!(w1.robot, w2.robot);
        assert!(w1.robot.position.x <= 900.0 && w1.robot.position.y <= 600.0);
    }
}
