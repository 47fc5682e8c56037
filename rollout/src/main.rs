//! Runs a named scenario and prints its statistics.
mod console;
mod scenario;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::ConsoleRecorder;
use log::info;
use scenario::{ConfigPaths, Overrides};
use std::path::PathBuf;

/// Names of the built-in scenarios.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioName {
    /// Differential-drive robot getting onto a line.
    LineFollowDrive,

    /// Holonomic robot getting onto a line.
    LineFollowHolo,

    /// Holonomic robot reaching a random target.
    PointSeek,

    /// Robot turning towards a random target.
    RotationCenter,
}

/// Train a tabular Q-learner in a simulated robot scenario
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scenario to run
    #[arg(value_enum)]
    scenario: ScenarioName,

    /// Number of episodes, overrides the scenario
    #[arg(short, long)]
    episodes: Option<usize>,

    /// Seed of the environment and the agent, overrides the scenario
    #[arg(short, long)]
    seed: Option<u64>,

    /// Load the scenario from a YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save the effective scenario to a YAML file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Measure the latency of agent calls
    #[arg(short, long, default_value_t = false)]
    latency: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let overrides = Overrides {
        episodes: args.episodes,
        seed: args.seed,
        latency: args.latency,
    };
    let paths = ConfigPaths {
        load: args.config.as_deref(),
        save: args.save_config.as_deref(),
    };
    info!("Running scenario {:?}", args.scenario);
    let mut recorder = ConsoleRecorder::default();
    let report = scenario::run(args.scenario, &overrides, paths, &mut recorder)?;
    println!("{}", report);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let args = Args::parse_from(["rollout", "line-follow-holo", "-e", "5", "--latency"]);
        assert_eq!(args.scenario, ScenarioName::LineFollowHolo);
        assert_eq!(args.episodes, Some(5));
        assert_eq!(args.seed, None);
        assert!(args.latency);

        let args = Args::parse_from(["rollout", "rotation-center", "--save-config", "s.yaml"]);
        assert_eq!(args.scenario, ScenarioName::RotationCenter);
        assert_eq!(args.save_config, Some(PathBuf::from("s.yaml")));
    }
}
