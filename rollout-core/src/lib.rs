#![warn(missing_docs)]
//! Orchestration of episodic reinforcement learning experiments.
//!
//! An [`ExperimentDriver`] runs a number of episodes of an [`Agent`] in an
//! [`Env`] through an [`EpisodeRunner`]. In every step the runner asks an
//! [`ExplorationSchedule`] for the exploration value, lets the agent act,
//! turns the change of the environment's shaping signal into a reward with a
//! [`RewardShaper`] and asks a [`TerminationPolicy`] whether the episode has
//! converged. Episode lengths and call latencies end up in [`Statistics`].
pub mod dummy;
pub mod error;
pub mod record;
pub mod reward;
pub mod stats;
pub mod termination;

mod base;
pub use base::{Act, Agent, Configurable, Env, Obs, Policy};

mod exploration;
pub use exploration::ExplorationSchedule;

pub use record::Recorder;
pub use reward::{DeltaReward, RewardShaper};
pub use stats::{Statistics, Summary};
pub use termination::{
    RollingAverage, SuccessStreak, TerminationConfig, TerminationPolicy, WindowSource,
};

mod runner;
pub use runner::{
    pacer_from_millis, EpisodeConfig, EpisodeEnd, EpisodeOutcome, EpisodeRunner, NoPacing, Pacer,
    SleepPacing,
};

pub mod driver;
pub use driver::{DriverConfig, ExperimentDriver, ExperimentReport};
