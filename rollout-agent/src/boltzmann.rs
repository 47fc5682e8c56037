//! Tabular Q-learning with Boltzmann exploration.
mod base;
mod config;
mod table;
pub use base::BoltzmannQ;
pub use config::{action_grid, BoltzmannQConfig, TdTarget};
