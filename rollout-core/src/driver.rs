//! Run a scenario: many episodes of one agent in one environment.
mod config;
mod report;
use crate::{
    error::RolloutError,
    record::{Record, RecordValue},
    Agent, Env, EpisodeRunner, Recorder, Statistics,
};
use anyhow::Result;
use chrono::Local;
pub use config::DriverConfig;
use log::info;
pub use report::ExperimentReport;

/// Name of the series of episode lengths.
pub const STEPS: &str = "steps";

/// Name of the series of `choose_action` latencies in microseconds.
pub const CHOOSE_LATENCY: &str = "choose_action_us";

/// Name of the series of `apply_reinforcement` latencies in microseconds.
pub const REINFORCE_LATENCY: &str = "apply_reinforcement_us";

/// Runs a fixed number of episodes and aggregates their statistics.
///
/// The agent keeps learning across episodes; only its episode-scoped trace
/// is cleared at the start of each one. The statistics are owned by the
/// driver for the whole run.
pub struct ExperimentDriver<E, A>
where
    E: Env,
    A: Agent<E>,
{
    n_episodes: usize,
    record_steps: bool,
    runner: EpisodeRunner,
    env: E,
    agent: A,
    stats: Statistics,
}

impl<E, A> ExperimentDriver<E, A>
where
    E: Env,
    A: Agent<E>,
{
    /// Constructs a driver.
    ///
    /// Fails if the configuration is invalid or if the agent and the
    /// environment disagree on observation or action dimensionality.
    pub fn new(config: &DriverConfig, env: E, agent: A) -> Result<Self> {
        config.validate()?;
        check_dims(&env, &agent)?;
        Ok(Self {
            n_episodes: config.n_episodes,
            record_steps: config.record_steps,
            runner: EpisodeRunner::build(&config.episode)?,
            env,
            agent,
            stats: Statistics::new(),
        })
    }

    /// Replaces the episode runner, e.g. to inject a pacing hook.
    pub fn with_runner(mut self, runner: EpisodeRunner) -> Self {
        self.runner = runner;
        self
    }

    /// The agent.
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// The environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Runs all episodes.
    ///
    /// A record is written to `recorder` after every episode, with the
    /// outcome of the episode and the running statistics of episode lengths.
    /// Statistics of a previous call are discarded; the agent keeps what it
    /// has learned.
    pub fn run(&mut self, recorder: &mut dyn Recorder) -> Result<ExperimentReport> {
        let mut converged = 0;
        self.stats = Statistics::new();

        for episode in 0..self.n_episodes {
            let step_recorder: Option<&mut dyn Recorder> = match self.record_steps {
                true => Some(&mut *recorder),
                false => None,
            };
            let outcome =
                self.runner
                    .run_episode(&mut self.agent, &mut self.env, episode, step_recorder);

            if outcome.is_converged() {
                converged += 1;
            }
            self.stats.add(STEPS, outcome.steps as f64);
            if self.runner.records_latency() {
                self.stats.extend(CHOOSE_LATENCY, outcome.choose_latencies);
                self.stats
                    .extend(REINFORCE_LATENCY, outcome.reinforce_latencies);
            }

            let steps = self.stats.summarize(STEPS)?;
            info!(
                "Episode {}: {} steps ({}), mean {:.2}, median {}",
                episode, outcome.steps, outcome.end, steps.mean, steps.median
            );

            let mut record = Record::from_slice(&[
                ("episode", RecordValue::Scalar(episode as _)),
                ("steps", RecordValue::Scalar(outcome.steps as _)),
                ("end", RecordValue::String(outcome.end.to_string())),
                ("total_reward", RecordValue::Scalar(outcome.total_reward)),
                ("time", RecordValue::DateTime(Local::now())),
            ]);
            record = record.merge(self.stats.to_record());
            recorder.write(record);
        }
        recorder.flush();

        let report = ExperimentReport {
            episodes: self.n_episodes,
            converged,
            steps: self.stats.summarize(STEPS)?,
            choose_latency: self.stats.summarize(CHOOSE_LATENCY).ok(),
            reinforce_latency: self.stats.summarize(REINFORCE_LATENCY).ok(),
        };
        info!(
            "Finished {} episodes, {} converged, mean steps {:.2}",
            report.episodes, report.converged, report.steps.mean
        );

        Ok(report)
    }
}

/// Fails if the agent and the environment disagree on a dimensionality.
pub fn check_dims<E, A>(env: &E, agent: &A) -> Result<(), RolloutError>
where
    E: Env,
    A: Agent<E> + ?Sized,
{
    if agent.obs_dim() != env.obs_dim() {
        return Err(RolloutError::DimensionMismatch {
            what: "observation",
            agent: agent.obs_dim(),
            env: env.obs_dim(),
        });
    }
    if agent.act_dim() != env.act_dim() {
        return Err(RolloutError::DimensionMismatch {
            what: "action",
            agent: agent.act_dim(),
            env: env.act_dim(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dummy::{ConstantEnv, ZeroAgent},
        record::BufferedRecorder,
        EpisodeConfig,
    };

    #[test]
    fn test_dimension_mismatch_fails_fast() {
        let config = DriverConfig::default();
        let env = ConstantEnv::new(2, 2, 1.0);
        let agent = ZeroAgent::new(3, 2);
        let err = ExperimentDriver::new(&config, env, agent).err().unwrap();
        assert_eq!(
            err.downcast_ref::<RolloutError>(),
            Some(&RolloutError::DimensionMismatch {
                what: "observation",
                agent: 3,
                env: 2
            })
        );

        let env = ConstantEnv::new(2, 2, 1.0);
        let agent = ZeroAgent::new(2, 1);
        assert!(ExperimentDriver::new(&config, env, agent).is_err());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = DriverConfig::default().n_episodes(0);
        let env = ConstantEnv::new(1, 1, 1.0);
        let agent = ZeroAgent::new(1, 1);
        assert!(ExperimentDriver::new(&config, env, agent).is_err());
    }

    #[test]
    fn test_records_per_episode_and_latency() -> Result<()> {
        let config = DriverConfig::default()
            .n_episodes(3)
            .episode(EpisodeConfig::default().max_steps(5).record_latency(true));
        let env = ConstantEnv::new(1, 1, 1.0);
        let agent = ZeroAgent::new(1, 1);
        let mut driver = ExperimentDriver::new(&config, env, agent)?;
        let mut recorder = BufferedRecorder::new();

        let report = driver.run(&mut recorder)?;
        assert_eq!(report.episodes, 3);
        assert_eq!(report.converged, 0);
        assert_eq!(report.choose_latency.map(|s| s.count), Some(15));
        assert_eq!(report.reinforce_latency.map(|s| s.count), Some(15));
        assert_eq!(recorder.len(), 3);
        for (i, record) in recorder.iter().enumerate() {
            assert_eq!(record.get_scalar("episode")?, i as f64);
            assert_eq!(record.get_string("end")?, "capped");
            assert_eq!(record.get_scalar("steps_median")?, 5.0);
            assert!(matches!(record.get("time"), Some(RecordValue::DateTime(_))));
        }
        assert_eq!(driver.agent().n_resets, 3);
        Ok(())
    }

    #[test]
    fn test_step_records() -> Result<()> {
        let config = DriverConfig::default()
            .n_episodes(2)
            .record_steps(true)
            .episode(EpisodeConfig::default().max_steps(4));
        let env = ConstantEnv::new(1, 1, 1.0);
        let agent = ZeroAgent::new(1, 1);
        let mut driver = ExperimentDriver::new(&config, env, agent)?;
        let mut recorder = BufferedRecorder::new();

        let report = driver.run(&mut recorder)?;
        assert_eq!(report.choose_latency, None);
        // 4 step records and 1 episode record per episode
        assert_eq!(recorder.len(), 10);
        Ok(())
    }

    #[test]
    fn test_second_run_starts_fresh_statistics() -> Result<()> {
        let config = DriverConfig::default()
            .n_episodes(3)
            .episode(EpisodeConfig::default().max_steps(4).record_latency(true));
        let env = ConstantEnv::new(1, 1, 1.0);
        let agent = ZeroAgent::new(1, 1);
        let mut driver = ExperimentDriver::new(&config, env, agent)?;

        driver.run(&mut BufferedRecorder::new())?;
        let mut recorder = BufferedRecorder::new();
        let report = driver.run(&mut recorder)?;
        assert_eq!(report.episodes, 3);
        assert_eq!(report.steps.count, 3);
        assert_eq!(report.choose_latency.map(|s| s.count), Some(12));
        assert_eq!(driver.stats().samples(STEPS).map(|vs| vs.len()), Some(3));
        // The agent is not rebuilt between runs.
        assert_eq!(driver.agent().n_resets, 6);
        let first = recorder.iter().next().unwrap();
        assert_eq!(first.get_scalar("steps_mean")?, 4.0);
        Ok(())
    }
}
