use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use winequality::submission::{self, FormInput, SubmissionOutcome};
use winequality::telemetry::{MetricsRecorder, MetricsSnapshot};
use winequality::{Classifier, FeatureRecord, PredictionResult, QualityClass, WineResult};

/// Owns the classifier loaded at start-up and runs every prediction through it.
#[derive(Clone)]
pub struct Runner {
    classifier: Arc<dyn Classifier>,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    /// Submit action stamped with the local wall clock.
    pub fn submit(&self, input: &FormInput) -> WineResult<SubmissionOutcome> {
        self.submit_at(input, Local::now().naive_local())
    }

    pub fn submit_at(&self, input: &FormInput, at: NaiveDateTime) -> WineResult<SubmissionOutcome> {
        match submission::submit(self.classifier.as_ref(), input, at) {
            Ok(outcome) => {
                self.metrics
                    .record_submission(outcome.prediction.label == QualityClass::High);
                Ok(outcome)
            }
            Err(err) => {
                self.metrics.record_error();
                Err(err)
            }
        }
    }

    pub fn predict(&self, record: &FeatureRecord) -> WineResult<PredictionResult> {
        self.classifier
            .classify(&record.clamped())
            .inspect_err(|_| self.metrics.record_error())
    }

    /// One-shot submission for the command line.
    pub fn execute(&self, input: &FormInput) -> anyhow::Result<SubmissionOutcome> {
        self.submit(input).context("running submission")
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
