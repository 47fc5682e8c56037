use super::{
    table::{argmax, softmax, Discretizer, QTable},
    BoltzmannQConfig, TdTarget,
};
use anyhow::Result;
use log::trace;
use rand::{distributions::WeightedIndex, rngs::StdRng, Rng, SeedableRng};
use rollout_core::{Agent, Configurable, Env, Policy};

/// Tabular Q-learner with Boltzmann action selection.
///
/// Observations are binned on a uniform grid; actions are taken from an
/// enumerated set. The exploration value given to
/// [`Policy::choose_action`] is the softmax temperature, and a non-positive
/// temperature gives the greedy action.
///
/// The Q-table persists across episodes. [`Agent::reset`] only forgets the
/// last chosen action, so a reinforcement never crosses an episode boundary.
pub struct BoltzmannQ {
    discretizer: Discretizer,
    actions: Vec<Vec<f64>>,
    q: QTable,
    learning_rate: f64,
    discount: f64,
    td_target: TdTarget,
    rng: StdRng,

    /// State, action and temperature of the last choice awaiting reinforcement.
    last: Option<(usize, usize, f64)>,
}

impl BoltzmannQ {
    /// Value of an action in the state of the given observation.
    pub fn q_value(&self, obs: &[f64], action: usize) -> f64 {
        self.q.get(self.discretizer.index(obs), action)
    }

    /// The enumerated action set.
    pub fn actions(&self) -> &[Vec<f64>] {
        &self.actions
    }

    fn sample(&mut self, state: usize, temperature: f64) -> usize {
        let row = self.q.row(state);
        match softmax(row, temperature).map(|p| WeightedIndex::new(&p)) {
            Some(Ok(dist)) => self.rng.sample(dist),
            _ => argmax(row),
        }
    }

    fn state_value(&self, state: usize, temperature: f64) -> f64 {
        let row = self.q.row(state);
        match (self.td_target, softmax(row, temperature)) {
            (TdTarget::Expected, Some(p)) => p.iter().zip(row.iter()).map(|(p, q)| p * q).sum(),
            _ => row[argmax(row)],
        }
    }
}

impl Configurable for BoltzmannQ {
    type Config = BoltzmannQConfig;

    fn build(config: Self::Config) -> Result<Self> {
        config.validate()?;
        let discretizer = Discretizer::new(config.obs_low, config.obs_high, config.bins);
        let q = QTable::new(discretizer.n_states(), config.actions.len());
        Ok(Self {
            discretizer,
            actions: config.actions,
            q,
            learning_rate: config.learning_rate,
            discount: config.discount,
            td_target: config.td_target,
            rng: StdRng::seed_from_u64(config.seed),
            last: None,
        })
    }
}

impl<E> Policy<E> for BoltzmannQ
where
    E: Env<Obs = Vec<f64>, Act = Vec<f64>>,
{
    fn choose_action(&mut self, obs: &Vec<f64>, exploration: f64) -> Vec<f64> {
        let state = self.discretizer.index(obs);
        let action = self.sample(state, exploration);
        self.last = Some((state, action, exploration));
        self.actions[action].clone()
    }
}

impl<E> Agent<E> for BoltzmannQ
where
    E: Env<Obs = Vec<f64>, Act = Vec<f64>>,
{
    fn reset(&mut self) {
        self.last = None;
    }

    fn apply_reinforcement(&mut self, reward: f64, obs: &Vec<f64>) {
        let (state, action, temperature) = match self.last.take() {
            Some(last) => last,
            None => return,
        };
        let next = self.discretizer.index(obs);
        let target = reward + self.discount * self.state_value(next, temperature);
        let q = self.q.get(state, action);
        let updated = q + self.learning_rate * (target - q);
        trace!(
            "q[{}][{}]: {:.4} -> {:.4} (reward {:.4})",
            state,
            action,
            q,
            updated,
            reward
        );
        self.q.set(state, action, updated);
    }

    fn obs_dim(&self) -> usize {
        self.discretizer.dim()
    }

    fn act_dim(&self) -> usize {
        self.actions[0].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollout_core::dummy::ScriptedEnv;

    type E = ScriptedEnv;

    fn agent(td_target: TdTarget) -> BoltzmannQ {
        let config = BoltzmannQConfig::default()
            .obs_bounds(vec![0.0], vec![1.0])
            .bins(2)
            .actions(vec![vec![-1.0], vec![1.0]])
            .learning_rate(0.5)
            .discount(0.0)
            .td_target(td_target);
        BoltzmannQ::build(config).unwrap()
    }

    #[test]
    fn test_update_moves_towards_reward() {
        let mut agent = agent(TdTarget::Max);
        let obs = vec![0.2];
        let act = Policy::<E>::choose_action(&mut agent, &obs, 0.0);
        // Greedy on an all-zero row picks the first action.
        assert_eq!(act, vec![-1.0]);
        Agent::<E>::apply_reinforcement(&mut agent, 1.0, &obs);
        assert_eq!(agent.q_value(&obs, 0), 0.5);

        // A second reinforcement without a new choice is ignored.
        Agent::<E>::apply_reinforcement(&mut agent, 1.0, &obs);
        assert_eq!(agent.q_value(&obs, 0), 0.5);
    }

    #[test]
    fn test_reset_drops_pending_choice() {
        let mut agent = agent(TdTarget::Expected);
        let obs = vec![0.9];
        Policy::<E>::choose_action(&mut agent, &obs, 1.0);
        Agent::<E>::reset(&mut agent);
        Agent::<E>::apply_reinforcement(&mut agent, 1.0, &obs);
        assert_eq!(agent.q_value(&obs, 0), 0.0);
        assert_eq!(agent.q_value(&obs, 1), 0.0);
    }

    #[test]
    fn test_learns_better_action() {
        let mut agent = agent(TdTarget::Max);
        let obs = vec![0.5];
        for _ in 0..200 {
            let act = Policy::<E>::choose_action(&mut agent, &obs, 1.0);
            let reward = act[0];
            Agent::<E>::apply_reinforcement(&mut agent, reward, &obs);
        }
        assert!(agent.q_value(&obs, 1) > agent.q_value(&obs, 0));
        for _ in 0..10 {
            assert_eq!(Policy::<E>::choose_action(&mut agent, &obs, 0.0), vec![1.0]);
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let mut a = agent(TdTarget::Max);
        let mut b = agent(TdTarget::Max);
        let obs = vec![0.1];
        for _ in 0..20 {
            assert_eq!(
                Policy::<E>::choose_action(&mut a, &obs, 1.0),
                Policy::<E>::choose_action(&mut b, &obs, 1.0)
            );
        }
    }

    #[test]
    fn test_dims() {
        let agent = BoltzmannQ::build(BoltzmannQConfig::default()).unwrap();
        assert_eq!(Agent::<E>::obs_dim(&agent), 1);
        assert_eq!(Agent::<E>::act_dim(&agent), 2);
    }
}
