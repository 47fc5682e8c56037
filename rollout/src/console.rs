use rollout_core::{record::Record, Recorder};

/// Prints a line to stdout for every episode record.
///
/// Records without an `end` entry, i.e. step records, are skipped.
#[derive(Default)]
pub struct ConsoleRecorder {}

impl ConsoleRecorder {
    fn line(record: &Record) -> Option<String> {
        let end = record.get_string("end").ok()?;
        let episode = record.get_scalar("episode").ok()?;
        let steps = record.get_scalar("steps").ok()?;
        let mean = record.get_scalar("steps_mean").ok()?;
        let median = record.get_scalar("steps_median").ok()?;
        Some(format!(
            "{}; {} steps ({}); average {:.2}; median {}",
            episode, steps, end, mean, median
        ))
    }
}

impl Recorder for ConsoleRecorder {
    fn write(&mut self, record: Record) {
        if let Some(line) = Self::line(&record) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollout_core::record::RecordValue;

    #[test]
    fn test_line() {
        let record = Record::from_slice(&[
            ("episode", RecordValue::Scalar(3.0)),
            ("steps", RecordValue::Scalar(120.0)),
            ("end", RecordValue::String("converged".into())),
            ("steps_mean", RecordValue::Scalar(99.5)),
            ("steps_median", RecordValue::Scalar(101.0)),
        ]);
        assert_eq!(
            ConsoleRecorder::line(&record).unwrap(),
            "3; 120 steps (converged); average 99.50; median 101"
        );
        assert_eq!(ConsoleRecorder::line(&Record::from_scalar("step", 1.0)), None);
    }
}
