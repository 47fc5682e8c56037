//! Types and traits for recording what happens in episodes.
//!
//! The [`EpisodeRunner`](crate::EpisodeRunner) writes one [`Record`] per step and the
//! [`ExperimentDriver`](crate::ExperimentDriver) one per finished episode. Where the
//! records go is up to the [`Recorder`]:
//!
//! * [`BufferedRecorder`] keeps them in memory, mostly for inspection in tests.
//! * [`NullRecorder`] drops them.
//!
//! ```rust
//! use rollout_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(4.0));
//! record.insert("reward", RecordValue::Scalar(-0.25));
//! record.insert("end", RecordValue::String("capped".to_string()));
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
