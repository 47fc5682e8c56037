//! Environments built on [`World`](crate::World).
//!
//! Every environment clips action components to `[-1, 1]` before scaling them
//! to the world's units.
mod line_follow;
mod point_seek;
mod rotation_center;
pub use line_follow::{LineFollowDrive, LineFollowDriveConfig, LineFollowHolo, LineFollowHoloConfig};
pub use point_seek::{PointSeek, PointSeekConfig};
pub use rotation_center::{RotationCenter, RotationCenterConfig};

fn clip(v: f64) -> f64 {
    v.clamp(-1.0, 1.0)
}
