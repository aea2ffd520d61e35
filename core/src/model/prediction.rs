use crate::math::stats::StatsHelper;
use crate::prelude::WineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Predicted wine quality, label 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum QualityClass {
    Low,
    High,
}

impl QualityClass {
    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(QualityClass::Low),
            1 => Some(QualityClass::High),
            _ => None,
        }
    }

    pub fn label(self) -> u8 {
        match self {
            QualityClass::Low => 0,
            QualityClass::High => 1,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            QualityClass::Low => "Low Quality",
            QualityClass::High => "High Quality",
        }
    }
}

impl From<QualityClass> for u8 {
    fn from(class: QualityClass) -> Self {
        class.label()
    }
}

impl TryFrom<u8> for QualityClass {
    type Error = WineError;

    fn try_from(label: u8) -> Result<Self, Self::Error> {
        QualityClass::from_label(label)
            .ok_or_else(|| WineError::Prediction(format!("label {} is not 0 or 1", label)))
    }
}

impl fmt::Display for QualityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Parses a stringified class label, as found in the reference table.
///
/// Accepts `0`/`1`, optionally wrapped as a one-element array (`[0]`).
/// Anything else is rejected rather than digit-substituted.
impl FromStr for QualityClass {
    type Err = WineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(trimmed)
            .trim();
        match inner {
            "0" => Ok(QualityClass::Low),
            "1" => Ok(QualityClass::High),
            _ => Err(WineError::Prediction(format!(
                "unrecognised class label {:?}",
                raw
            ))),
        }
    }
}

/// Label plus rounded class probabilities `[p_low, p_high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: QualityClass,
    pub probabilities: [f64; 2],
}

impl PredictionResult {
    pub fn new(label: QualityClass, probabilities: [f64; 2]) -> Self {
        Self {
            label,
            probabilities: probabilities.map(|p| StatsHelper::round_dp(p, 2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_render_exact_text() {
        assert_eq!("0".parse::<QualityClass>().unwrap().to_string(), "Low Quality");
        assert_eq!("1".parse::<QualityClass>().unwrap().to_string(), "High Quality");
        assert_eq!("[1]".parse::<QualityClass>().unwrap(), QualityClass::High);
        assert_eq!(" [ 0 ] ".parse::<QualityClass>().unwrap(), QualityClass::Low);
    }

    #[test]
    fn other_digits_are_not_substituted() {
        for raw in ["10", "01", "2", "[0 1]", "", "Low"] {
            assert!(raw.parse::<QualityClass>().is_err(), "{raw:?} accepted");
        }
    }

    #[test]
    fn probabilities_round_to_two_places() {
        let result = PredictionResult::new(QualityClass::High, [0.3349, 0.6651]);
        assert_eq!(result.probabilities, [0.33, 0.67]);
    }

    #[test]
    fn label_serializes_as_number() {
        let result = PredictionResult::new(QualityClass::Low, [0.9, 0.1]);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["label"], 0);
        let back: PredictionResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.label, QualityClass::Low);
        assert!(serde_json::from_str::<QualityClass>("2").is_err());
    }
}
