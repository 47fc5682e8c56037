//! Named scenarios: an environment, an agent and the driver parameters.
use crate::ScenarioName;
use anyhow::Result;
use rollout_agent::{action_grid, BoltzmannQ, BoltzmannQConfig};
use rollout_core::{
    reward::max_step_scale,
    termination::WindowSource,
    Configurable, DriverConfig, Env, EpisodeConfig, ExperimentDriver, ExperimentReport,
    ExplorationSchedule, Recorder, TerminationConfig,
};
use rollout_sim::{
    LineFollowDrive, LineFollowDriveConfig, LineFollowHolo, LineFollowHoloConfig, PointSeek,
    PointSeekConfig, RotationCenter, RotationCenterConfig,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

const SEED: u64 = 42;
const LEARNING_RATE: f64 = 0.4;

const DRIVE_EPISODES: usize = 10_000;
const DRIVE_MAX_STEPS: usize = 10_000;
const DRIVE_EXPLORATION: f64 = 0.8;
const DRIVE_EXPLORATION_DECAY: f64 = 0.99;
const DRIVE_REWARD_SCALE: f64 = 20.0;
const DRIVE_SUCCESS_DISTANCE: f64 = 100.0;
const DRIVE_SUCCESS_STREAK: usize = 100;
const DRIVE_ROTATION_BINS: usize = 8;

const HOLO_EPISODES: usize = 200;
const HOLO_MAX_STEPS: usize = 1000;
const HOLO_COMPONENT: f64 = 20.0;
const HOLO_EXPLORATION: f64 = 0.2;
const HOLO_LEAD_IN: usize = 2;
const HOLO_SUCCESS_DISTANCE: f64 = 80.0;
const HOLO_SUCCESS_STREAK: usize = 5;
const HOLO_DISCOUNT: f64 = 0.95;

const SEEK_EPISODES: usize = 200;
const SEEK_MAX_STEPS: usize = 1000;
const SEEK_COMPONENT: f64 = 20.0;
const SEEK_EXPLORATION: f64 = 0.5;
const SEEK_EXPLORATION_DECAY: f64 = 0.98;
const SEEK_EXPLORATION_MIN: f64 = 0.05;
const SEEK_SUCCESS_DISTANCE: f64 = 25.0;
const SEEK_SUCCESS_STREAK: usize = 3;
const SEEK_BINS: usize = 6;
const SEEK_DISCOUNT: f64 = 0.9;

const ROTATION_EPISODES: usize = 200;
const ROTATION_MAX_STEPS: usize = 500;
const ROTATION_MAX_TURN: f64 = 30.0;
const ROTATION_EXPLORATION: f64 = 0.5;
const ROTATION_EXPLORATION_DECAY: f64 = 0.98;
const ROTATION_EXPLORATION_MIN: f64 = 0.05;
const ROTATION_WINDOW: usize = 5;
const ROTATION_THRESHOLD: f64 = 10.0;
const ROTATION_BINS: usize = 12;
const ROTATION_ACTIONS: usize = 5;
const ROTATION_DISCOUNT: f64 = 0.9;

/// Everything needed to run one scenario.
///
/// `C` is the configuration of the environment. The agent is always a
/// [`BoltzmannQ`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Scenario<C> {
    /// Seed of the environment.
    pub seed: u64,

    /// Configuration of the environment.
    pub env_config: C,

    /// Configuration of the agent.
    pub agent_config: BoltzmannQConfig,

    /// Configuration of the driver.
    pub driver_config: DriverConfig,
}

impl<C> Scenario<C>
where
    C: Serialize + DeserializeOwned,
{
    /// Sets the number of episodes.
    pub fn n_episodes(mut self, v: usize) -> Self {
        self.driver_config.n_episodes = v;
        self
    }

    /// Sets the seeds of both the environment and the agent.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self.agent_config.seed = v;
        self
    }

    /// Sets whether to time the agent calls.
    pub fn record_latency(mut self, v: bool) -> Self {
        self.driver_config.episode.record_latency = v;
        self
    }

    /// Constructs [`Scenario`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`Scenario`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }

    /// Builds the environment and the agent, then runs all episodes.
    pub fn run<E>(&self, recorder: &mut dyn Recorder) -> Result<ExperimentReport>
    where
        E: Env<Config = C, Obs = Vec<f64>, Act = Vec<f64>>,
        C: Clone,
    {
        let env = E::build(&self.env_config, self.seed)?;
        let agent = BoltzmannQ::build(self.agent_config.clone())?;
        let mut driver = ExperimentDriver::new(&self.driver_config, env, agent)?;
        driver.run(recorder)
    }
}

/// Differential-drive robot getting onto the line.
pub fn line_follow_drive() -> Scenario<LineFollowDriveConfig> {
    let episode = EpisodeConfig::default()
        .max_steps(DRIVE_MAX_STEPS)
        .reward_scale(DRIVE_REWARD_SCALE)
        .exploration(ExplorationSchedule::StepDecay {
            rate: DRIVE_EXPLORATION,
            decay: DRIVE_EXPLORATION_DECAY,
        })
        .termination(TerminationConfig::SuccessStreak {
            threshold: DRIVE_SUCCESS_DISTANCE,
            target: DRIVE_SUCCESS_STREAK,
        });
    let agent_config = BoltzmannQConfig::default()
        .obs_bounds(vec![0.0, 0.0], vec![1.0, 1.0])
        .bins(DRIVE_ROTATION_BINS)
        .actions(action_grid(2, 3, -1.0, 1.0))
        .learning_rate(LEARNING_RATE)
        .discount(1.0)
        .seed(SEED);
    Scenario {
        seed: SEED,
        env_config: LineFollowDriveConfig::default(),
        agent_config,
        driver_config: DriverConfig::default()
            .n_episodes(DRIVE_EPISODES)
            .episode(episode),
    }
}

/// Holonomic robot getting onto the line.
pub fn line_follow_holo() -> Scenario<LineFollowHoloConfig> {
    let episode = EpisodeConfig::default()
        .max_steps(HOLO_MAX_STEPS)
        .lead_in_steps(HOLO_LEAD_IN)
        .reward_scale(max_step_scale(HOLO_COMPONENT, 2))
        .exploration(ExplorationSchedule::Constant {
            rate: HOLO_EXPLORATION,
        })
        .termination(TerminationConfig::SuccessStreak {
            threshold: HOLO_SUCCESS_DISTANCE,
            target: HOLO_SUCCESS_STREAK,
        });
    let agent_config = BoltzmannQConfig::default()
        .obs_bounds(vec![0.0], vec![1.0])
        .bins(2)
        .actions(action_grid(2, 3, -1.0, 1.0))
        .learning_rate(LEARNING_RATE)
        .discount(HOLO_DISCOUNT)
        .seed(SEED);
    let env_config = LineFollowHoloConfig {
        component: HOLO_COMPONENT,
        ..Default::default()
    };
    Scenario {
        seed: SEED,
        env_config,
        agent_config,
        driver_config: DriverConfig::default()
            .n_episodes(HOLO_EPISODES)
            .episode(episode),
    }
}

/// Holonomic robot reaching a random target.
pub fn point_seek() -> Scenario<PointSeekConfig> {
    let episode = EpisodeConfig::default()
        .max_steps(SEEK_MAX_STEPS)
        .reward_scale(max_step_scale(SEEK_COMPONENT, 2))
        .exploration(ExplorationSchedule::EpisodeDecay {
            rate: SEEK_EXPLORATION,
            decay: SEEK_EXPLORATION_DECAY,
            min: SEEK_EXPLORATION_MIN,
        })
        .termination(TerminationConfig::SuccessStreak {
            threshold: SEEK_SUCCESS_DISTANCE,
            target: SEEK_SUCCESS_STREAK,
        });
    let agent_config = BoltzmannQConfig::default()
        .obs_bounds(vec![-1.0, -1.0], vec![1.0, 1.0])
        .bins(SEEK_BINS)
        .actions(action_grid(2, 3, -1.0, 1.0))
        .learning_rate(LEARNING_RATE)
        .discount(SEEK_DISCOUNT)
        .seed(SEED);
    let env_config = PointSeekConfig {
        component: SEEK_COMPONENT,
        ..Default::default()
    };
    Scenario {
        seed: SEED,
        env_config,
        agent_config,
        driver_config: DriverConfig::default()
            .n_episodes(SEEK_EPISODES)
            .episode(episode),
    }
}

/// Robot turning towards a random target.
pub fn rotation_center() -> Scenario<RotationCenterConfig> {
    let episode = EpisodeConfig::default()
        .max_steps(ROTATION_MAX_STEPS)
        .reward_scale(ROTATION_MAX_TURN)
        .exploration(ExplorationSchedule::EpisodeDecay {
            rate: ROTATION_EXPLORATION,
            decay: ROTATION_EXPLORATION_DECAY,
            min: ROTATION_EXPLORATION_MIN,
        })
        .termination(TerminationConfig::RollingAverage {
            window: ROTATION_WINDOW,
            threshold: ROTATION_THRESHOLD,
            source: WindowSource::Signal,
        });
    let agent_config = BoltzmannQConfig::default()
        .obs_bounds(vec![-1.0], vec![1.0])
        .bins(ROTATION_BINS)
        .actions(action_grid(1, ROTATION_ACTIONS, -1.0, 1.0))
        .learning_rate(LEARNING_RATE)
        .discount(ROTATION_DISCOUNT)
        .seed(SEED);
    let env_config = RotationCenterConfig {
        max_turn: ROTATION_MAX_TURN,
        ..Default::default()
    };
    Scenario {
        seed: SEED,
        env_config,
        agent_config,
        driver_config: DriverConfig::default()
            .n_episodes(ROTATION_EPISODES)
            .episode(episode),
    }
}

/// Overrides given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Number of episodes.
    pub episodes: Option<usize>,

    /// Seed of the environment and the agent.
    pub seed: Option<u64>,

    /// Time the agent calls.
    pub latency: bool,
}

/// Where a scenario comes from and where its configuration goes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigPaths<'a> {
    /// Load the scenario from this file instead of the built-in one.
    pub load: Option<&'a Path>,

    /// Save the effective scenario to this file before running.
    pub save: Option<&'a Path>,
}

fn prepare<C>(
    builtin: Scenario<C>,
    overrides: &Overrides,
    paths: ConfigPaths,
) -> Result<Scenario<C>>
where
    C: Serialize + DeserializeOwned,
{
    let mut scenario = match paths.load {
        Some(path) => Scenario::load(path)?,
        None => builtin,
    };
    if let Some(n) = overrides.episodes {
        scenario = scenario.n_episodes(n);
    }
    if let Some(seed) = overrides.seed {
        scenario = scenario.seed(seed);
    }
    if overrides.latency {
        scenario = scenario.record_latency(true);
    }
    if let Some(path) = paths.save {
        scenario.save(path)?;
    }
    Ok(scenario)
}

/// Runs a named scenario.
pub fn run(
    name: ScenarioName,
    overrides: &Overrides,
    paths: ConfigPaths,
    recorder: &mut dyn Recorder,
) -> Result<ExperimentReport> {
    match name {
        ScenarioName::LineFollowDrive => {
            prepare(line_follow_drive(), overrides, paths)?.run::<LineFollowDrive>(recorder)
        }
        ScenarioName::LineFollowHolo => {
            prepare(line_follow_holo(), overrides, paths)?.run::<LineFollowHolo>(recorder)
        }
        ScenarioName::PointSeek => {
            prepare(point_seek(), overrides, paths)?.run::<PointSeek>(recorder)
        }
        ScenarioName::RotationCenter => {
            prepare(rotation_center(), overrides, paths)?.run::<RotationCenter>(recorder)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollout_core::record::BufferedRecorder;
    use tempdir::TempDir;

    fn quick() -> Overrides {
        Overrides {
            episodes: Some(3),
            seed: Some(7),
            latency: true,
        }
    }

    #[test]
    fn test_builtin_scenarios_are_valid() -> Result<()> {
        line_follow_drive().driver_config.validate()?;
        line_follow_holo().driver_config.validate()?;
        point_seek().driver_config.validate()?;
        rotation_center().driver_config.validate()?;
        line_follow_drive().agent_config.validate()?;
        line_follow_holo().agent_config.validate()?;
        point_seek().agent_config.validate()?;
        rotation_center().agent_config.validate()?;
        Ok(())
    }

    #[test]
    fn test_holo_constants() {
        let scenario = line_follow_holo();
        let episode = &scenario.driver_config.episode;
        assert_eq!(scenario.driver_config.n_episodes, 200);
        assert_eq!(episode.max_steps, 1000);
        assert_eq!(episode.lead_in_steps, 2);
        assert!((episode.reward_scale - 800f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_run_every_scenario() -> Result<()> {
        for name in [
            ScenarioName::LineFollowHolo,
            ScenarioName::PointSeek,
            ScenarioName::RotationCenter,
        ] {
            let mut recorder = BufferedRecorder::new();
            let report = run(name, &quick(), ConfigPaths::default(), &mut recorder)?;
            assert_eq!(report.episodes, 3);
            assert_eq!(recorder.len(), 3);
            assert!(report.steps.max <= 1000.0);
            assert!(report.choose_latency.is_some());
        }
        Ok(())
    }

    #[test]
    fn test_run_drive_capped() -> Result<()> {
        let mut scenario = line_follow_drive().n_episodes(2);
        scenario.driver_config.episode.max_steps = 50;
        let mut recorder = BufferedRecorder::new();
        let report = scenario.run::<LineFollowDrive>(&mut recorder)?;
        assert_eq!(report.episodes, 2);
        assert!(report.steps.max <= 50.0);
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let dir = TempDir::new("scenario")?;
        let path = dir.path().join("point_seek.yaml");
        let paths = ConfigPaths {
            load: None,
            save: Some(path.as_path()),
        };
        let saved = prepare(point_seek(), &quick(), paths)?;
        let loaded = Scenario::<PointSeekConfig>::load(&path)?;
        assert_eq!(saved, loaded);
        assert_eq!(loaded.driver_config.n_episodes, 3);
        assert_eq!(loaded.agent_config.seed, 7);

        // A loaded scenario still takes the overrides.
        let paths = ConfigPaths {
            load: Some(path.as_path()),
            save: None,
        };
        let overrides = Overrides {
            episodes: Some(5),
            ..Default::default()
        };
        let scenario = prepare(point_seek(), &overrides, paths)?;
        assert_eq!(scenario.driver_config.n_episodes, 5);
        assert_eq!(scenario.seed, 7);
        Ok(())
    }
}
