use serde::Serialize;
use std::sync::Mutex;

/// Counters for submissions served and failed.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub submissions: usize,
    pub low_predictions: usize,
    pub high_predictions: usize,
    pub errors: usize,
}

struct Metrics {
    submissions: usize,
    low_predictions: usize,
    high_predictions: usize,
    errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                submissions: 0,
                low_predictions: 0,
                high_predictions: 0,
                errors: 0,
            }),
        }
    }

    pub fn record_submission(&self, high: bool) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.submissions += 1;
            if high {
                metrics.high_predictions += 1;
            } else {
                metrics.low_predictions += 1;
            }
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                submissions: metrics.submissions,
                low_predictions: metrics.low_predictions,
                high_predictions: metrics.high_predictions,
                errors: metrics.errors,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_split_by_class() {
        let metrics = MetricsRecorder::new();
        metrics.record_submission(true);
        metrics.record_submission(false);
        metrics.record_submission(true);
        metrics.record_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.submissions, 3);
        assert_eq!(snapshot.high_predictions, 2);
        assert_eq!(snapshot.low_predictions, 1);
        assert_eq!(snapshot.errors, 1);
    }
}
