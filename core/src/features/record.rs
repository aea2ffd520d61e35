use crate::features::schema::{FieldSpec, FEATURE_COUNT, FIELD_SPECS};
use crate::prelude::{WineError, WineResult};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One wine sample in classifier input order.
///
/// Fields missing from serialized input take the widget default, as they do
/// on the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureRecord {
    pub fixed_acidity: f64,
    pub volatile_acidity: f64,
    pub citric_acid: f64,
    pub residual_sugar: f64,
    pub chlorides: f64,
    pub free_sulfur_dioxide: f64,
    pub total_sulfur_dioxide: f64,
    pub density: f64,
    pub ph: f64,
    pub sulphates: f64,
    pub alcohol: f64,
}

impl FeatureRecord {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        let [
            fixed_acidity,
            volatile_acidity,
            citric_acid,
            residual_sugar,
            chlorides,
            free_sulfur_dioxide,
            total_sulfur_dioxide,
            density,
            ph,
            sulphates,
            alcohol,
        ] = values;
        Self {
            fixed_acidity,
            volatile_acidity,
            citric_acid,
            residual_sugar,
            chlorides,
            free_sulfur_dioxide,
            total_sulfur_dioxide,
            density,
            ph,
            sulphates,
            alcohol,
        }
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.fixed_acidity,
            self.volatile_acidity,
            self.citric_acid,
            self.residual_sugar,
            self.chlorides,
            self.free_sulfur_dioxide,
            self.total_sulfur_dioxide,
            self.density,
            self.ph,
            self.sulphates,
            self.alcohol,
        ]
    }

    /// Every field at its lower bound; also what an untouched form submits.
    pub fn minimum() -> Self {
        Self::from_values(FIELD_SPECS.map(|spec| spec.min))
    }

    pub fn maximum() -> Self {
        Self::from_values(FIELD_SPECS.map(|spec| spec.max))
    }

    /// Applies the widget clamping to every field.
    pub fn clamped(&self) -> Self {
        let values = self.values();
        let mut out = [0.0; FEATURE_COUNT];
        for (idx, spec) in FIELD_SPECS.iter().enumerate() {
            out[idx] = spec.clamp(values[idx]);
        }
        Self::from_values(out)
    }

    /// Builds a record from raw form fields keyed by column name.
    ///
    /// Missing or blank fields take the widget default; present values are
    /// clamped. Text that does not parse as a number is rejected.
    pub fn from_form(fields: &HashMap<String, String>) -> WineResult<Self> {
        let mut out = [0.0; FEATURE_COUNT];
        for (idx, spec) in FIELD_SPECS.iter().enumerate() {
            out[idx] = match fields.get(spec.name).map(|raw| raw.trim()) {
                None | Some("") => spec.default_value(),
                Some(raw) => {
                    let parsed: f64 = raw.parse().map_err(|_| {
                        WineError::InvalidInput(format!("{} is not a number: {:?}", spec.name, raw))
                    })?;
                    spec.clamp(parsed)
                }
            };
        }
        Ok(Self::from_values(out))
    }

    /// Pairs each value with the spec that governs it.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, f64)> {
        FIELD_SPECS.iter().zip(self.values())
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(self.values().to_vec())
    }

    /// Stacks records into a row-per-record matrix.
    pub fn to_matrix(records: &[FeatureRecord]) -> Array2<f64> {
        let mut matrix = Array2::zeros((records.len(), FEATURE_COUNT));
        for (mut row, record) in matrix.rows_mut().into_iter().zip(records) {
            row.assign(&record.to_array());
        }
        matrix
    }
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self::minimum()
    }
}
