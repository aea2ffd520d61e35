use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use winequality::dataset::{ReferenceDataset, ReferenceRow};
use winequality::features::{feature_names, FEATURE_COUNT};
use winequality::model::{ForestArtifact, TreeArrays};
use winequality::{Classifier, FeatureRecord, RandomForest, WineResult};

/// Observed span of each column in the public red wine table, schema order.
const COLUMN_SPANS: [(f64, f64); FEATURE_COUNT] = [
    (4.6, 15.9),
    (0.12, 1.58),
    (0.0, 1.0),
    (0.9, 15.5),
    (0.012, 0.611),
    (1.0, 72.0),
    (6.0, 289.0),
    (0.99007, 1.00369),
    (2.74, 4.01),
    (0.33, 2.0),
    (8.4, 14.9),
];

/// Settings for the synthetic reference table used in demo mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub rows: usize,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { rows: 64, seed: 7 }
    }
}

fn stump(feature: usize, threshold: f64, low: [f64; 2], high: [f64; 2]) -> TreeArrays {
    TreeArrays {
        children_left: vec![1, -1, -1],
        children_right: vec![2, -1, -1],
        feature: vec![feature as i64, -2, -2],
        threshold: vec![threshold, -2.0, -2.0],
        value: vec![
            vec![low[0] + high[0], low[1] + high[1]],
            low.to_vec(),
            high.to_vec(),
        ],
    }
}

/// Small hand-built forest keyed on the strongest quality signals.
pub fn demo_artifact() -> ForestArtifact {
    let alcohol_then_acidity = TreeArrays {
        children_left: vec![1, -1, 3, -1, -1],
        children_right: vec![2, -1, 4, -1, -1],
        feature: vec![10, -2, 1, -2, -2],
        threshold: vec![10.45, -2.0, 0.555, -2.0, -2.0],
        value: vec![
            vec![744.0, 855.0],
            vec![536.0, 261.0],
            vec![208.0, 594.0],
            vec![62.0, 389.0],
            vec![146.0, 205.0],
        ],
    };
    ForestArtifact {
        feature_names: feature_names().iter().map(|n| n.to_string()).collect(),
        n_classes: 2,
        trees: vec![
            alcohol_then_acidity,
            stump(9, 0.635, [512.0, 351.0], [232.0, 504.0]),
            stump(6, 81.5, [541.0, 747.0], [203.0, 108.0]),
            stump(1, 0.535, [213.0, 439.0], [531.0, 416.0]),
        ],
    }
}

pub fn demo_forest() -> WineResult<RandomForest> {
    RandomForest::from_artifact(&demo_artifact())
}

/// Seeded synthetic table labeled by `classifier`.
pub fn synthetic_dataset(
    classifier: &dyn Classifier,
    config: &DemoConfig,
) -> anyhow::Result<ReferenceDataset> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rows = Vec::with_capacity(config.rows);

    for index in 0..config.rows {
        let mut values = [0.0; FEATURE_COUNT];
        for (value, &(low, high)) in values.iter_mut().zip(COLUMN_SPANS.iter()) {
            // squeeze towards the middle of the span
            let t: f64 = (rng.gen::<f64>() + rng.gen::<f64>()) / 2.0;
            *value = low + (high - low) * t;
        }
        let features = FeatureRecord::from_values(values).clamped();
        let quality = classifier
            .predict(&features)
            .with_context(|| format!("labelling synthetic row {}", index))?;
        rows.push(ReferenceRow {
            index,
            features,
            quality,
        });
    }

    Ok(ReferenceDataset::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use winequality::QualityClass;

    #[test]
    fn demo_forest_separates_obvious_cases() {
        let forest = demo_forest().unwrap();
        let mut strong = FeatureRecord::minimum();
        strong.alcohol = 13.0;
        strong.volatile_acidity = 0.3;
        strong.sulphates = 0.8;
        strong.total_sulfur_dioxide = 30.0;
        assert_eq!(forest.predict(&strong).unwrap(), QualityClass::High);

        let mut weak = strong;
        weak.alcohol = 9.0;
        weak.volatile_acidity = 0.9;
        weak.sulphates = 0.4;
        weak.total_sulfur_dioxide = 120.0;
        assert_eq!(forest.predict(&weak).unwrap(), QualityClass::Low);
    }

    #[test]
    fn synthetic_dataset_is_seeded() {
        let forest = demo_forest().unwrap();
        let config = DemoConfig { rows: 12, seed: 3 };
        let first = synthetic_dataset(&forest, &config).unwrap();
        let second = synthetic_dataset(&forest, &config).unwrap();
        assert_eq!(first.len(), 12);
        assert_eq!(first.rows(), second.rows());
        for row in first.rows() {
            assert_eq!(row.quality, forest.predict(&row.features).unwrap());
        }
    }
}
