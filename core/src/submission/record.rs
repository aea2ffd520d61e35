use crate::features::FeatureRecord;
use crate::model::prediction::{PredictionResult, QualityClass};
use crate::submission::form::FormInput;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Illustration shown next to the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeImage {
    pub url: Cow<'static, str>,
    pub alt: Cow<'static, str>,
}

pub const LOW_QUALITY_IMAGE: OutcomeImage = OutcomeImage {
    url: Cow::Borrowed("https://w.forfun.com/fetch/4d/4d2e2094c306b0c6245d136e286f6eaa.jpeg"),
    alt: Cow::Borrowed("Low quality red wine"),
};

pub const HIGH_QUALITY_IMAGE: OutcomeImage = OutcomeImage {
    url: Cow::Borrowed("https://w.forfun.com/fetch/20/203c306b2f5c0c2b619ad2f25c9f4244.jpeg"),
    alt: Cow::Borrowed("High quality red wine"),
};

impl OutcomeImage {
    pub fn for_class(class: QualityClass) -> Self {
        match class {
            QualityClass::Low => LOW_QUALITY_IMAGE,
            QualityClass::High => HIGH_QUALITY_IMAGE,
        }
    }
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub name: String,
    pub surname: String,
    pub date: String,
    pub time: String,
    pub features: FeatureRecord,
    pub prediction: String,
}

impl SubmissionRecord {
    pub fn new(input: &FormInput, label: QualityClass, at: NaiveDateTime) -> Self {
        Self {
            name: input.name.clone(),
            surname: input.surname.clone(),
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H:%M:%S").to_string(),
            features: input.features,
            prediction: label.display_name().to_string(),
        }
    }

    /// Header/value pairs in display order.
    pub fn columns(&self) -> Vec<(&'static str, String)> {
        let mut columns = vec![
            ("Name", self.name.clone()),
            ("Surname", self.surname.clone()),
            ("Date", self.date.clone()),
            ("Time", self.time.clone()),
        ];
        columns.extend(
            self.features
                .fields()
                .map(|(spec, value)| (spec.name, spec.format(value))),
        );
        columns.push(("Prediction", self.prediction.clone()));
        columns
    }
}

/// What the result area shows after a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub record: SubmissionRecord,
    pub prediction: PredictionResult,
    pub image: OutcomeImage,
}
