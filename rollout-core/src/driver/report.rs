use crate::Summary;
use std::fmt;

/// Aggregated result of [`ExperimentDriver::run`](super::ExperimentDriver::run).
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentReport {
    /// Number of episodes run.
    pub episodes: usize,

    /// Number of episodes that converged before the step cap.
    pub converged: usize,

    /// Statistics of the number of steps per episode.
    pub steps: Summary,

    /// Statistics of the latency of `choose_action` in microseconds, if measured.
    pub choose_latency: Option<Summary>,

    /// Statistics of the latency of `apply_reinforcement` in microseconds, if measured.
    pub reinforce_latency: Option<Summary>,
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "series, mean, median, min, max")?;
        let rows = [
            ("steps", Some(&self.steps)),
            ("choose_action [us]", self.choose_latency.as_ref()),
            ("apply_reinforcement [us]", self.reinforce_latency.as_ref()),
        ];
        for (name, summary) in rows {
            if let Some(s) = summary {
                writeln!(f, "{}, {}, {}, {}, {}", name, s.mean, s.median, s.min, s.max)?;
            }
        }
        write!(f, "converged: {}/{}", self.converged, self.episodes)
    }
}
