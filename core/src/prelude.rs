use crate::features::FeatureRecord;
use crate::model::prediction::{PredictionResult, QualityClass};

/// Common error type for schema, artifact and prediction failures.
#[derive(thiserror::Error, Debug)]
pub enum WineError {
    #[error("io failure on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model artifact: {0}")]
    ModelFormat(String),
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("reference dataset: {0}")]
    Dataset(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("prediction failed: {0}")]
    Prediction(String),
}

pub type WineResult<T> = Result<T, WineError>;

/// Binary quality classifier consumed as an opaque dependency.
///
/// Implementations must accept every record produced by the form schema;
/// `predict_proba` returns `[p_low, p_high]` summing to one.
pub trait Classifier: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> WineResult<QualityClass>;
    fn predict_proba(&self, record: &FeatureRecord) -> WineResult<[f64; 2]>;

    /// Runs both calls and packages the rounded result.
    fn classify(&self, record: &FeatureRecord) -> WineResult<PredictionResult> {
        let label = self.predict(record)?;
        let probabilities = self.predict_proba(record)?;
        Ok(PredictionResult::new(label, probabilities))
    }
}
