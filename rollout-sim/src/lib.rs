#![warn(missing_docs)]
//! Simulated robot environments.
//!
//! A [`World`] holds a line, a target point and a robot. The environments in
//! [`env`] expose it to agents through [`rollout_core::Env`], each with its
//! own observation, action and shaping signal.
pub mod env;
mod world;
pub use env::{
    LineFollowDrive, LineFollowDriveConfig, LineFollowHolo, LineFollowHoloConfig, PointSeek,
    PointSeekConfig, RotationCenter, RotationCenterConfig,
};
pub use world::{wrap_degrees, Line, Robot, Vec2, World, WorldConfig};
