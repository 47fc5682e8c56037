use super::{StepSignal, TerminationPolicy};

/// Converges after a run of consecutive steps close enough to the goal.
///
/// A step is successful when `|signal| < threshold`. Any unsuccessful step
/// resets the streak to zero.
#[derive(Debug, Clone)]
pub struct SuccessStreak {
    threshold: f64,
    target: usize,
    streak: usize,
}

impl SuccessStreak {
    /// Constructs the policy.
    pub fn new(threshold: f64, target: usize) -> Self {
        Self {
            threshold,
            target,
            streak: 0,
        }
    }

    /// Current number of consecutive successful steps.
    pub fn streak(&self) -> usize {
        self.streak
    }
}

impl TerminationPolicy for SuccessStreak {
    fn reset(&mut self) {
        self.streak = 0;
    }

    fn record(&mut self, signal: &StepSignal) {
        if signal.signal.abs() < self.threshold {
            self.streak += 1;
        } else {
            self.streak = 0;
        }
    }

    fn should_stop(&self) -> bool {
        self.streak >= self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(policy: &mut SuccessStreak, step: usize, signal: f64) {
        policy.record(&StepSignal {
            step,
            signal,
            action_norm: 1.0,
        });
    }

    #[test]
    fn test_alternating_signal_never_converges() {
        let mut policy = SuccessStreak::new(80.0, 2);
        for step in 0..50 {
            let signal = if step % 2 == 0 { 10.0 } else { 120.0 };
            feed(&mut policy, step, signal);
            if step % 2 == 1 {
                assert_eq!(policy.streak(), 0);
            } else {
                assert_eq!(policy.streak(), 1);
            }
            assert!(!policy.should_stop());
        }
    }

    #[test]
    fn test_uninterrupted_run_converges() {
        let mut policy = SuccessStreak::new(80.0, 5);
        let signals = [10.0, 10.0, 10.0, 90.0, 10.0, -20.0, 10.0, 10.0, 10.0];
        let mut stopped_at = None;
        for (step, &signal) in signals.iter().enumerate() {
            feed(&mut policy, step, signal);
            if policy.should_stop() {
                stopped_at = Some(step);
                break;
            }
        }
        assert_eq!(stopped_at, Some(8));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut policy = SuccessStreak::new(80.0, 1);
        feed(&mut policy, 0, 80.0);
        assert!(!policy.should_stop());
        feed(&mut policy, 1, 79.9);
        assert!(policy.should_stop());
        policy.reset();
        assert_eq!(policy.streak(), 0);
    }
}
