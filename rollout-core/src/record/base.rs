//! Key-value records emitted by the runner and the driver.
use crate::error::RolloutError;
use chrono::prelude::{DateTime, Local};
use std::collections::HashMap;

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, like a step count or a reward.
    Scalar(f64),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A text value, like a scenario name or an episode end reason.
    String(String),
}

/// A container for storing key-value pairs of various data types.
///
/// ```rust
/// use rollout_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("steps", 120.0);
/// record.insert("end", RecordValue::String("converged".to_string()));
///
/// assert_eq!(record.get_scalar("steps").unwrap(), 120.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f64) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// If both records contain the same key, the value from `record` wins.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f64, RolloutError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(RolloutError::RecordValueTypeError("Scalar".to_string())),
            None => Err(RolloutError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, RolloutError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(RolloutError::RecordValueTypeError("String".to_string())),
            None => Err(RolloutError::RecordKeyError(k.to_string())),
        }
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_scalar_errors() {
        let mut record = Record::from_scalar("steps", 3.0);
        record.insert("end", RecordValue::String("capped".into()));

        assert_eq!(record.get_scalar("steps"), Ok(3.0));
        assert_eq!(
            record.get_scalar("end"),
            Err(RolloutError::RecordValueTypeError("Scalar".into()))
        );
        assert_eq!(
            record.get_scalar("reward"),
            Err(RolloutError::RecordKeyError("reward".into()))
        );
    }

    #[test]
    fn test_merge_overwrites() {
        let a = Record::from_slice(&[
            ("steps", RecordValue::Scalar(1.0)),
            ("reward", RecordValue::Scalar(0.5)),
        ]);
        let b = Record::from_scalar("steps", 2.0);
        let merged = a.merge(b);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get_scalar("steps").unwrap(), 2.0);
        assert_eq!(merged.get_scalar("reward").unwrap(), 0.5);
    }
}
