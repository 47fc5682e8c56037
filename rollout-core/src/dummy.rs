//! Stub agents and environments. This module is used for tests.
use crate::{Agent, Env, Policy};
use anyhow::Result;

/// Agent always choosing the zero action and remembering what it was given.
#[derive(Debug, Default, Clone)]
pub struct ZeroAgent {
    obs_dim: usize,
    act_dim: usize,

    /// Number of calls to [`Agent::reset`].
    pub n_resets: usize,

    /// Number of calls to [`Policy::choose_action`].
    pub n_choices: usize,

    /// Number of calls to [`Agent::apply_reinforcement`].
    pub n_reinforcements: usize,

    /// Rewards received since the last reset.
    pub rewards: Vec<f64>,
}

impl ZeroAgent {
    /// Constructs the agent.
    pub fn new(obs_dim: usize, act_dim: usize) -> Self {
        Self {
            obs_dim,
            act_dim,
            ..Default::default()
        }
    }
}

impl<E> Policy<E> for ZeroAgent
where
    E: Env<Obs = Vec<f64>, Act = Vec<f64>>,
{
    fn choose_action(&mut self, _obs: &Vec<f64>, _exploration: f64) -> Vec<f64> {
        self.n_choices += 1;
        vec![0.0; self.act_dim]
    }
}

impl<E> Agent<E> for ZeroAgent
where
    E: Env<Obs = Vec<f64>, Act = Vec<f64>>,
{
    fn reset(&mut self) {
        self.n_resets += 1;
        self.rewards.clear();
    }

    fn apply_reinforcement(&mut self, reward: f64, _obs: &Vec<f64>) {
        self.n_reinforcements += 1;
        self.rewards.push(reward);
    }

    fn obs_dim(&self) -> usize {
        self.obs_dim
    }

    fn act_dim(&self) -> usize {
        self.act_dim
    }
}

/// Configuration of [`ConstantEnv`]: `(obs_dim, act_dim, signal)`.
pub type ConstantEnvConfig = (usize, usize, f64);

/// Environment whose shaping signal never changes.
#[derive(Debug, Clone)]
pub struct ConstantEnv {
    obs_dim: usize,
    act_dim: usize,
    signal: f64,

    /// Number of applied actions.
    pub n_applied: usize,
}

impl ConstantEnv {
    /// Constructs the environment.
    pub fn new(obs_dim: usize, act_dim: usize, signal: f64) -> Self {
        Self {
            obs_dim,
            act_dim,
            signal,
            n_applied: 0,
        }
    }
}

impl Env for ConstantEnv {
    type Config = ConstantEnvConfig;
    type Obs = Vec<f64>;
    type Act = Vec<f64>;

    fn build(config: &Self::Config, _seed: u64) -> Result<Self> {
        let (obs_dim, act_dim, signal) = *config;
        Ok(Self::new(obs_dim, act_dim, signal))
    }

    fn reset(&mut self) -> Vec<f64> {
        self.observe()
    }

    fn apply(&mut self, _act: &Vec<f64>) {
        self.n_applied += 1;
    }

    fn observe(&self) -> Vec<f64> {
        vec![0.0; self.obs_dim]
    }

    fn signal(&self) -> f64 {
        self.signal
    }

    fn obs_dim(&self) -> usize {
        self.obs_dim
    }

    fn act_dim(&self) -> usize {
        self.act_dim
    }
}

/// Environment replaying a fixed sequence of shaping signals.
///
/// Every applied action moves to the next signal. The last signal is repeated
/// once the sequence is exhausted. Observations are `[signal]`.
#[derive(Debug, Clone)]
pub struct ScriptedEnv {
    signals: Vec<f64>,
    ix: usize,
}

impl ScriptedEnv {
    /// Constructs the environment. `signals` must not be empty.
    pub fn new(signals: Vec<f64>) -> Self {
        Self { signals, ix: 0 }
    }
}

impl Env for ScriptedEnv {
    type Config = Vec<f64>;
    type Obs = Vec<f64>;
    type Act = Vec<f64>;

    fn build(config: &Self::Config, _seed: u64) -> Result<Self> {
        Ok(Self::new(config.clone()))
    }

    fn reset(&mut self) -> Vec<f64> {
        self.ix = 0;
        self.observe()
    }

    fn apply(&mut self, _act: &Vec<f64>) {
        self.ix = (self.ix + 1).min(self.signals.len() - 1);
    }

    fn observe(&self) -> Vec<f64> {
        vec![self.signal()]
    }

    fn signal(&self) -> f64 {
        self.signals[self.ix]
    }

    fn obs_dim(&self) -> usize {
        1
    }

    fn act_dim(&self) -> usize {
        1
    }
}
