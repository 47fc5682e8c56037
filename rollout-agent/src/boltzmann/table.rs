/// Maps continuous observations to the index of a uniform grid cell.
#[derive(Debug, Clone)]
pub struct Discretizer {
    low: Vec<f64>,
    high: Vec<f64>,
    bins: usize,
}

impl Discretizer {
    pub fn new(low: Vec<f64>, high: Vec<f64>, bins: usize) -> Self {
        Self { low, high, bins }
    }

    pub fn dim(&self) -> usize {
        self.low.len()
    }

    pub fn n_states(&self) -> usize {
        self.bins.pow(self.dim() as u32)
    }

    /// Values outside the bounds fall into the outermost cells.
    pub fn index(&self, obs: &[f64]) -> usize {
        obs.iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .fold(0, |ix, (v, (lo, hi))| {
                let t = (v - lo) / (hi - lo) * self.bins as f64;
                let bin = if t.is_nan() {
                    0
                } else {
                    (t.floor().max(0.0) as usize).min(self.bins - 1)
                };
                ix * self.bins + bin
            })
    }
}

/// Row-major table of action values.
#[derive(Debug, Clone)]
pub struct QTable {
    values: Vec<f64>,
    n_actions: usize,
}

impl QTable {
    pub fn new(n_states: usize, n_actions: usize) -> Self {
        Self {
            values: vec![0.0; n_states * n_actions],
            n_actions,
        }
    }

    pub fn row(&self, state: usize) -> &[f64] {
        &self.values[state * self.n_actions..(state + 1) * self.n_actions]
    }

    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[state * self.n_actions + action]
    }

    pub fn set(&mut self, state: usize, action: usize, v: f64) {
        self.values[state * self.n_actions + action] = v;
    }
}

/// Boltzmann probabilities of `q` at `temperature`, `None` if not positive.
pub fn softmax(q: &[f64], temperature: f64) -> Option<Vec<f64>> {
    if !(temperature > 0.0) {
        return None;
    }
    let max = q.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = q.iter().map(|v| ((v - max) / temperature).exp()).collect();
    let sum: f64 = weights.iter().sum();
    Some(weights.into_iter().map(|w| w / sum).collect())
}

/// Index of the largest value, the first one on ties.
pub fn argmax(q: &[f64]) -> usize {
    q.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, v)| {
            if *v > bv {
                (i, *v)
            } else {
                (bi, bv)
            }
        })
        .0
}
