use std::fmt;

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEnd {
    /// The termination policy declared convergence.
    Converged,

    /// The step cap was reached first.
    Capped,
}

impl fmt::Display for EpisodeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::Capped => write!(f, "capped"),
        }
    }
}

/// Result of [`EpisodeRunner::run_episode`](super::EpisodeRunner::run_episode).
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeOutcome {
    /// Number of reward-bearing steps taken.
    pub steps: usize,

    /// Why the episode ended.
    pub end: EpisodeEnd,

    /// Sum of the rewards given to the agent.
    pub total_reward: f64,

    /// Latencies of `choose_action` in microseconds, empty unless measured.
    pub choose_latencies: Vec<f64>,

    /// Latencies of `apply_reinforcement` in microseconds, empty unless measured.
    pub reinforce_latencies: Vec<f64>,
}

impl EpisodeOutcome {
    /// Returns `true` if the episode converged before the step cap.
    pub fn is_converged(&self) -> bool {
        self.end == EpisodeEnd::Converged
    }
}
