//! Run episodes of an [`Agent`] in an [`Env`].
mod config;
mod outcome;
mod pacing;
use crate::{
    record::{Record, RecordValue},
    termination::{StepSignal, TerminationPolicy},
    Act, Agent, DeltaReward, Env, ExplorationSchedule, Recorder, RewardShaper,
};
use anyhow::Result;
pub use config::EpisodeConfig;
use log::{debug, warn};
pub use outcome::{EpisodeEnd, EpisodeOutcome};
pub use pacing::{pacer_from_millis, NoPacing, Pacer, SleepPacing};
use std::time::Instant;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Runs one episode at a time.
///
/// # Episode loop
///
/// 0. [`Agent::reset`], [`Env::reset`] and reset of the termination policy.
/// 1. Compute the exploration value of the step.
/// 2. Apply `lead_in_steps` actions without reinforcement.
/// 3. Read the shaping signal `s_t` and observation `o_t`.
/// 4. Choose `a_t` from `o_t` and apply it to the environment.
/// 5. Read `s_t+1` and `o_t+1`, compute the reward from `(s_t, s_t+1)`.
/// 6. Give the reward and `o_t+1` to the agent.
/// 7. Feed `s_t+1` and `|a_t|` to the termination policy, `steps += 1`.
/// 8. Stop on convergence or when `steps == max_steps`, else back to 1.
///
/// ```mermaid
/// graph LR
///     X[ExplorationSchedule]-->|exploration|A[Agent]
///     A-->|Env::Act|B[Env]
///     B-->|Env::Obs|A
///     B-->|signal|R[RewardShaper]
///     R-->|reward|A
///     B-->|signal|T[TerminationPolicy]
/// ```
///
/// Rewards are only computed when both signals are finite. A non-finite
/// signal, e.g. from a degenerate normalization in the environment, gives a
/// zero reward.
pub struct EpisodeRunner {
    max_steps: usize,
    lead_in_steps: usize,
    record_latency: bool,
    exploration: ExplorationSchedule,
    termination: Box<dyn TerminationPolicy>,
    shaper: Box<dyn RewardShaper>,
    pacer: Box<dyn Pacer>,
}

impl EpisodeRunner {
    /// Constructs a runner.
    pub fn build(config: &EpisodeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            max_steps: config.max_steps,
            lead_in_steps: config.lead_in_steps,
            record_latency: config.record_latency,
            exploration: config.exploration.clone(),
            termination: config.termination.build(),
            shaper: Box::new(DeltaReward::new(config.reward_scale)),
            pacer: pacer_from_millis(config.pacing_millis),
        })
    }

    /// Replaces the pacing hook.
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    /// Replaces the reward shaper.
    pub fn with_reward_shaper(mut self, shaper: impl RewardShaper + 'static) -> Self {
        self.shaper = Box::new(shaper);
        self
    }

    /// Replaces the termination policy.
    pub fn with_termination(mut self, policy: impl TerminationPolicy + 'static) -> Self {
        self.termination = Box::new(policy);
        self
    }

    /// The step cap.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Whether latencies are measured.
    pub fn records_latency(&self) -> bool {
        self.record_latency
    }

    /// Runs an episode.
    ///
    /// `episode` is the index of the episode in the run, used by the
    /// exploration schedule. If `recorder` is given, one record is written per
    /// reward-bearing step.
    pub fn run_episode<E, A>(
        &mut self,
        agent: &mut A,
        env: &mut E,
        episode: usize,
        mut recorder: Option<&mut dyn Recorder>,
    ) -> EpisodeOutcome
    where
        E: Env,
        A: Agent<E> + ?Sized,
    {
        agent.reset();
        env.reset();
        self.termination.reset();

        let mut steps = 0;
        let mut total_reward = 0.0;
        let mut end = EpisodeEnd::Capped;
        let mut choose_latencies = vec![];
        let mut reinforce_latencies = vec![];

        while steps < self.max_steps {
            let exploration = self.exploration.exploration_at(steps, episode);

            for _ in 0..self.lead_in_steps {
                let obs = env.observe();
                let act = agent.choose_action(&obs, exploration);
                env.apply(&act);
            }

            let pre = env.signal();
            let obs = env.observe();

            let timer = Instant::now();
            let act = agent.choose_action(&obs, exploration);
            if self.record_latency {
                choose_latencies.push(timer.elapsed().as_secs_f64() * 1e6);
            }

            env.apply(&act);
            let post = env.signal();
            let next_obs = env.observe();

            let reward = if pre.is_finite() && post.is_finite() {
                self.shaper.reward(pre, post)
            } else {
                warn!(
                    "Non-finite shaping signal at step {} of episode {} ({} -> {}), reward set to 0",
                    steps, episode, pre, post
                );
                0.0
            };

            let timer = Instant::now();
            agent.apply_reinforcement(reward, &next_obs);
            if self.record_latency {
                reinforce_latencies.push(timer.elapsed().as_secs_f64() * 1e6);
            }
            total_reward += reward;

            self.termination.record(&StepSignal {
                step: steps,
                signal: post,
                action_norm: act.norm(),
            });
            debug!(
                "episode {}, step {}, exploration {:.4}, signal {:.3}, reward {:.4}",
                episode,
                steps,
                exploration,
                post,
                reward
            );
            if let Some(recorder) = recorder.as_mut() {
                recorder.write(Record::from_slice(&[
                    ("episode", RecordValue::Scalar(episode as _)),
                    ("step", RecordValue::Scalar(steps as _)),
                    ("exploration", RecordValue::Scalar(exploration)),
                    ("signal", RecordValue::Scalar(post)),
                    ("reward", RecordValue::Scalar(reward)),
                ]));
            }
            steps += 1;

            if self.termination.should_stop() {
                end = EpisodeEnd::Converged;
                break;
            }
            if steps < self.max_steps {
                self.pacer.pause();
            }
        }

        EpisodeOutcome {
            steps,
            end,
            total_reward,
            choose_latencies,
            reinforce_latencies,
        }
    }
}
