use crate::features::FeatureRecord;
use crate::prelude::WineResult;
use crate::submission::record::SubmissionOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const NAME_HINT: &str = "Please ensure that the initial letter of your name is capitalized.";
pub const SURNAME_HINT: &str =
    "Please ensure that the initial letter of your surname is capitalized.";

/// Everything the sidebar hands to the submit handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub features: FeatureRecord,
}

impl FormInput {
    /// Reads `name`, `surname` and the feature columns from urlencoded fields.
    pub fn from_form(fields: &HashMap<String, String>) -> WineResult<Self> {
        Ok(Self {
            name: fields.get("name").cloned().unwrap_or_default(),
            surname: fields.get("surname").cloned().unwrap_or_default(),
            features: FeatureRecord::from_form(fields)?,
        })
    }

    /// Same input with every feature clamped to its widget range.
    pub fn clamped(&self) -> Self {
        Self {
            features: self.features.clamped(),
            ..self.clone()
        }
    }
}

/// Result area state for one page render.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormState {
    #[default]
    AwaitingSubmission,
    Submitted(Box<SubmissionOutcome>),
}

impl FormState {
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        match self {
            FormState::AwaitingSubmission => None,
            FormState::Submitted(outcome) => Some(outcome),
        }
    }
}
