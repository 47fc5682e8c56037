//! Aggregation of scalar samples over a run.
//!
//! Samples are kept in named series, e.g. the number of steps of every episode
//! or the latency of every call to the agent. Summaries are always recomputed
//! from the full history of a series.
use crate::{
    error::RolloutError,
    record::{Record, RecordValue},
};
use std::collections::HashMap;
use xxhash_rust::xxh3::Xxh3Builder;

/// Summary statistics of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of samples.
    pub count: usize,

    /// Arithmetic mean.
    pub mean: f64,

    /// Upper median, see [`median`].
    pub median: f64,

    /// Smallest sample.
    pub min: f64,

    /// Largest sample.
    pub max: f64,
}

/// Arithmetic mean. `vs` must not be empty.
fn mean(vs: &[f64]) -> f64 {
    vs.iter().sum::<f64>() / vs.len() as f64
}

/// The element at index `len / 2` of the sorted samples.
///
/// For an even number of samples this is the upper of the two middle values;
/// the two are not averaged. `vs` must not be empty.
pub fn median(vs: &[f64]) -> f64 {
    let mut sorted = vs.to_vec();
    sorted.sort_by(|x, y| x.total_cmp(y));
    sorted[sorted.len() / 2]
}

impl Summary {
    /// Summarizes the given samples, `None` if there is none.
    pub fn of(vs: &[f64]) -> Option<Self> {
        if vs.is_empty() {
            return None;
        }
        Some(Self {
            count: vs.len(),
            mean: mean(vs),
            median: median(vs),
            min: *vs.iter().min_by(|x, y| x.total_cmp(y))?,
            max: *vs.iter().max_by(|x, y| x.total_cmp(y))?,
        })
    }
}

/// Named append-only series of samples.
///
/// The aggregator never discards samples. Start a new one for every run.
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    series: HashMap<String, Vec<f64>, Xxh3Builder>,
}

impl Statistics {
    /// Creates an aggregator without any series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample to a series, creating the series if needed.
    pub fn add(&mut self, series: &str, sample: f64) {
        match self.series.get_mut(series) {
            Some(vs) => vs.push(sample),
            None => {
                self.series.insert(series.to_string(), vec![sample]);
            }
        }
    }

    /// Appends samples to a series.
    pub fn extend(&mut self, series: &str, samples: impl IntoIterator<Item = f64>) {
        for v in samples {
            self.add(series, v);
        }
    }

    /// Samples of a series in the order they were added.
    pub fn samples(&self, series: &str) -> Option<&[f64]> {
        self.series.get(series).map(|vs| vs.as_slice())
    }

    /// Summarizes a series.
    pub fn summarize(&self, series: &str) -> Result<Summary, RolloutError> {
        self.series
            .get(series)
            .and_then(|vs| Summary::of(vs))
            .ok_or_else(|| RolloutError::SeriesKeyError(series.to_string()))
    }

    /// Flattens the summaries of all series into a record with keys
    /// `{series}_mean` and `{series}_median`.
    pub fn to_record(&self) -> Record {
        let mut record = Record::empty();
        for (key, vs) in self.series.iter() {
            if let Some(summary) = Summary::of(vs) {
                record.insert(format!("{}_mean", key), RecordValue::Scalar(summary.mean));
                record.insert(
                    format!("{}_median", key),
                    RecordValue::Scalar(summary.median),
                );
            }
        }
        record
    }
}
