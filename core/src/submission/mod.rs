pub mod form;
pub mod record;

pub use form::{FormInput, FormState, NAME_HINT, SURNAME_HINT};
pub use record::{
    OutcomeImage, SubmissionOutcome, SubmissionRecord, HIGH_QUALITY_IMAGE, LOW_QUALITY_IMAGE,
};

use crate::prelude::{Classifier, WineResult};
use crate::telemetry::log::LogManager;
use chrono::NaiveDateTime;

/// Handles the submit action: the only path that invokes the classifier.
///
/// Inputs are clamped to their widget ranges before prediction. Classifier
/// failures propagate unchanged.
pub fn submit(
    classifier: &dyn Classifier,
    input: &FormInput,
    at: NaiveDateTime,
) -> WineResult<SubmissionOutcome> {
    let logger = LogManager::new("submission");
    let input = input.clamped();
    for (field, value) in [("name", &input.name), ("surname", &input.surname)] {
        if !starts_capitalized(value) {
            logger.warn(&format!("{} {:?} does not start with a capital letter", field, value));
        }
    }
    let prediction = classifier.classify(&input.features)?;
    let record = SubmissionRecord::new(&input, prediction.label, at);
    logger.record(&format!(
        "{} -> {} {:?}",
        record.time,
        record.prediction,
        prediction.probabilities
    ));
    Ok(SubmissionOutcome {
        record,
        prediction,
        image: OutcomeImage::for_class(prediction.label),
    })
}

/// The capitalization hint is advisory only.
fn starts_capitalized(value: &str) -> bool {
    value.chars().next().map_or(true, char::is_uppercase)
}

impl FormState {
    /// AwaitingSubmission -> Submitted. A failed prediction leaves no state.
    pub fn submit(
        classifier: &dyn Classifier,
        input: &FormInput,
        at: NaiveDateTime,
    ) -> WineResult<Self> {
        submit(classifier, input, at).map(|outcome| FormState::Submitted(Box::new(outcome)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureRecord;
    use crate::model::forest::tests::stump_artifact;
    use crate::model::prediction::QualityClass;
    use crate::model::RandomForest;
    use crate::prelude::{WineError, WineResult};
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(12, 5, 9)
            .unwrap()
    }

    struct Failing;

    impl Classifier for Failing {
        fn predict(&self, _: &FeatureRecord) -> WineResult<QualityClass> {
            Err(WineError::Prediction("artifact unavailable".into()))
        }

        fn predict_proba(&self, _: &FeatureRecord) -> WineResult<[f64; 2]> {
            Err(WineError::Prediction("artifact unavailable".into()))
        }
    }

    #[test]
    fn submit_builds_record_and_picks_image() {
        let forest = RandomForest::from_artifact(&stump_artifact()).unwrap();
        let mut input = FormInput {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            features: FeatureRecord::minimum(),
        };
        input.features.alcohol = 13.0;
        input.features.sulphates = 0.9;

        let outcome = submit(&forest, &input, noon()).unwrap();
        assert_eq!(outcome.record.prediction, "High Quality");
        assert_eq!(outcome.record.date, "2024-03-09");
        assert_eq!(outcome.record.time, "12:05:09");
        assert_eq!(outcome.image, HIGH_QUALITY_IMAGE);
        assert_eq!(outcome.prediction.probabilities, [0.25, 0.75]);
    }

    #[test]
    fn capitalization_hint_does_not_block() {
        assert!(starts_capitalized("Ada"));
        assert!(starts_capitalized(""));
        assert!(!starts_capitalized("ada"));

        let forest = RandomForest::from_artifact(&stump_artifact()).unwrap();
        let input = FormInput {
            name: "ada".into(),
            ..Default::default()
        };
        assert_eq!(submit(&forest, &input, noon()).unwrap().record.name, "ada");
    }

    #[test]
    fn low_prediction_uses_low_image() {
        let forest = RandomForest::from_artifact(&stump_artifact()).unwrap();
        let outcome = submit(&forest, &FormInput::default(), noon()).unwrap();
        assert_eq!(outcome.record.prediction, "Low Quality");
        assert_eq!(outcome.image, LOW_QUALITY_IMAGE);
    }

    #[test]
    fn out_of_range_input_is_clamped_before_prediction() {
        let forest = RandomForest::from_artifact(&stump_artifact()).unwrap();
        let mut input = FormInput::default();
        input.features.alcohol = 99.0;
        let outcome = submit(&forest, &input, noon()).unwrap();
        assert_eq!(outcome.record.features.alcohol, 15.0);
    }

    #[test]
    fn record_columns_follow_table_layout() {
        let input = FormInput {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            features: FeatureRecord::minimum(),
        };
        let record = SubmissionRecord::new(&input, QualityClass::Low, noon());
        let columns = record.columns();
        assert_eq!(columns.len(), 16);
        assert_eq!(columns[0], ("Name", "Ada".to_string()));
        assert_eq!(columns[4], ("fixed_acidity", "0.0".to_string()));
        assert_eq!(columns[11], ("density", "0.99000".to_string()));
        assert_eq!(columns[15], ("Prediction", "Low Quality".to_string()));
    }

    #[test]
    fn failing_classifier_keeps_form_unsubmitted() {
        let result = FormState::submit(&Failing, &FormInput::default(), noon());
        assert!(matches!(result, Err(WineError::Prediction(_))));

        let forest = RandomForest::from_artifact(&stump_artifact()).unwrap();
        let state = FormState::submit(&forest, &FormInput::default(), noon()).unwrap();
        assert!(matches!(state, FormState::Submitted(_)));
        let prediction = state.outcome().map(|o| o.prediction).unwrap();
        assert_eq!(prediction.label, QualityClass::Low);
        let sum: f64 = prediction.probabilities.iter().sum();
        assert!((sum - 1.0).abs() <= 0.01);
    }
}
