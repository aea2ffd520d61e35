use serde::Serialize;
use winequality::dataset::ReferenceSample;
use winequality::{FormInput, FormState};

/// Everything one page render reads.
#[derive(Debug, Clone, Copy)]
pub struct PageModel<'a> {
    pub sample: &'a ReferenceSample,
    pub form: &'a FormInput,
    pub state: &'a FormState,
}

impl<'a> PageModel<'a> {
    pub fn new(sample: &'a ReferenceSample, form: &'a FormInput, state: &'a FormState) -> Self {
        Self {
            sample,
            form,
            state,
        }
    }
}

/// JSON body for API failures.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReply {
    pub status: &'static str,
    pub message: String,
}

impl StatusReply {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}
