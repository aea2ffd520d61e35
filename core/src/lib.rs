//! Feature schema, classifier artifact and submission handling for the red
//! wine quality form.
//!
//! The form collects eleven chemistry measurements, hands them to a
//! pre-trained binary classifier and reports "Low Quality" or "High Quality"
//! with rounded class probabilities. Nothing here persists between
//! submissions.

pub mod dataset;
pub mod features;
pub mod math;
pub mod model;
pub mod prelude;
pub mod submission;
pub mod telemetry;

pub use features::{FeatureRecord, FieldSpec, FIELD_SPECS};
pub use model::{PredictionResult, QualityClass, RandomForest};
pub use prelude::{Classifier, WineError, WineResult};
pub use submission::{FormInput, FormState, SubmissionOutcome, SubmissionRecord};
