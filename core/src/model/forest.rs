use crate::features::{feature_names, FeatureRecord, FEATURE_COUNT};
use crate::math::matrix::MatrixHelper;
use crate::math::stats::StatsHelper;
use crate::model::prediction::QualityClass;
use crate::prelude::{Classifier, WineError, WineResult};
use crate::telemetry::log::LogManager;
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

const LEAF: i64 = -1;

/// Flat node arrays of one exported decision tree.
///
/// Mirrors the `tree_` layout of scikit-learn: node `i` is a leaf when
/// `children_left[i] == -1`, otherwise samples with
/// `x[feature[i]] <= threshold[i]` descend left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Class weights per node, written as `[a, b]`. The single-output
    /// `[[a, b]]` shape of `tree_.value` is accepted on read.
    #[serde(deserialize_with = "node_weights")]
    pub value: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeWeights {
    Flat(Vec<f64>),
    PerOutput(Vec<Vec<f64>>),
}

fn node_weights<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error> {
    Vec::<NodeWeights>::deserialize(deserializer)?
        .into_iter()
        .enumerate()
        .map(|(node, weights)| match weights {
            NodeWeights::Flat(weights) => Ok(weights),
            NodeWeights::PerOutput(mut outputs) if outputs.len() == 1 => Ok(outputs.remove(0)),
            NodeWeights::PerOutput(outputs) => Err(D::Error::custom(format!(
                "node {} carries {} outputs, expected 1",
                node,
                outputs.len()
            ))),
        })
        .collect()
}

/// On-disk random forest artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub feature_names: Vec<String>,
    pub n_classes: usize,
    pub trees: Vec<TreeArrays>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: [f64; 2],
    },
}

#[derive(Debug, Clone)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn compile(index: usize, arrays: &TreeArrays) -> WineResult<Self> {
        let count = arrays.children_left.len();
        if count == 0 {
            return Err(WineError::ModelFormat(format!("tree {} has no nodes", index)));
        }
        if arrays.children_right.len() != count
            || arrays.feature.len() != count
            || arrays.threshold.len() != count
            || arrays.value.len() != count
        {
            return Err(WineError::ModelFormat(format!(
                "tree {} node arrays differ in length",
                index
            )));
        }

        let child = |node: usize, raw: i64| -> WineResult<usize> {
            usize::try_from(raw)
                .ok()
                .filter(|&c| c > node && c < count)
                .ok_or_else(|| {
                    WineError::ModelFormat(format!(
                        "tree {} node {} has invalid child {}",
                        index, node, raw
                    ))
                })
        };

        let mut nodes = Vec::with_capacity(count);
        for node in 0..count {
            let left = arrays.children_left[node];
            let right = arrays.children_right[node];
            if left == LEAF && right == LEAF {
                let weights = &arrays.value[node];
                if weights.len() != 2 {
                    return Err(WineError::ModelFormat(format!(
                        "tree {} leaf {} carries {} class weights",
                        index,
                        node,
                        weights.len()
                    )));
                }
                let proba = StatsHelper::normalize(weights).ok_or_else(|| {
                    WineError::ModelFormat(format!(
                        "tree {} leaf {} has no usable class weights",
                        index, node
                    ))
                })?;
                nodes.push(Node::Leaf {
                    proba: [proba[0], proba[1]],
                });
            } else {
                let feature = usize::try_from(arrays.feature[node])
                    .ok()
                    .filter(|&f| f < FEATURE_COUNT)
                    .ok_or_else(|| {
                        WineError::ModelFormat(format!(
                            "tree {} node {} splits on feature {}",
                            index, node, arrays.feature[node]
                        ))
                    })?;
                let threshold = arrays.threshold[node];
                if !threshold.is_finite() {
                    return Err(WineError::ModelFormat(format!(
                        "tree {} node {} has non-finite threshold",
                        index, node
                    )));
                }
                nodes.push(Node::Split {
                    feature,
                    threshold,
                    left: child(node, left)?,
                    right: child(node, right)?,
                });
            }
        }

        Ok(Self { nodes })
    }

    fn leaf_proba(&self, row: ArrayView1<f64>) -> [f64; 2] {
        let mut cursor = 0;
        loop {
            match &self.nodes[cursor] {
                Node::Leaf { proba } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    cursor = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Random forest binary classifier loaded from a JSON artifact.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn load<P: AsRef<Path>>(path: P) -> WineResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| WineError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        let artifact: ForestArtifact = serde_json::from_str(&contents)
            .map_err(|err| WineError::ModelFormat(format!("{}: {}", path_ref.display(), err)))?;
        let forest = Self::from_artifact(&artifact)?;
        LogManager::new("model").record(&format!(
            "loaded {} trees from {}",
            forest.tree_count(),
            path_ref.display()
        ));
        Ok(forest)
    }

    pub fn from_artifact(artifact: &ForestArtifact) -> WineResult<Self> {
        let expected = feature_names();
        if artifact.feature_names.len() != FEATURE_COUNT
            || artifact
                .feature_names
                .iter()
                .zip(expected.iter())
                .any(|(got, want)| got != want)
        {
            return Err(WineError::SchemaMismatch(format!(
                "artifact expects {:?}, form provides {:?}",
                artifact.feature_names, expected
            )));
        }
        if artifact.n_classes != 2 {
            return Err(WineError::ModelFormat(format!(
                "expected 2 classes, artifact declares {}",
                artifact.n_classes
            )));
        }
        if artifact.trees.is_empty() {
            return Err(WineError::ModelFormat("forest has no trees".into()));
        }

        let trees = artifact
            .trees
            .iter()
            .enumerate()
            .map(|(index, arrays)| DecisionTree::compile(index, arrays))
            .collect::<WineResult<Vec<_>>>()?;
        Ok(Self { trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Mean class probabilities per row of a `(n, 11)` matrix.
    pub fn predict_proba_matrix(&self, rows: ArrayView2<f64>) -> WineResult<Array2<f64>> {
        if rows.ncols() != FEATURE_COUNT {
            return Err(WineError::SchemaMismatch(format!(
                "expected {} columns, got {}",
                FEATURE_COUNT,
                rows.ncols()
            )));
        }
        if rows.iter().any(|v| !v.is_finite()) {
            return Err(WineError::InvalidInput("feature values must be finite".into()));
        }

        let mut out = Array2::zeros((rows.nrows(), 2));
        for (row, mut target) in rows.rows().into_iter().zip(out.rows_mut()) {
            for tree in &self.trees {
                let proba = tree.leaf_proba(row);
                target[0] += proba[0];
                target[1] += proba[1];
            }
        }
        out /= self.trees.len() as f64;
        Ok(out)
    }

    pub fn predict_matrix(&self, rows: ArrayView2<f64>) -> WineResult<Vec<QualityClass>> {
        let proba = self.predict_proba_matrix(rows)?;
        MatrixHelper::argmax_rows(proba.view())
            .into_iter()
            .map(|idx| {
                QualityClass::from_label(idx as u8)
                    .ok_or_else(|| WineError::Prediction(format!("class index {}", idx)))
            })
            .collect()
    }
}

impl Classifier for RandomForest {
    fn predict(&self, record: &FeatureRecord) -> WineResult<QualityClass> {
        let rows = FeatureRecord::to_matrix(std::slice::from_ref(record));
        self.predict_matrix(rows.view())?
            .into_iter()
            .next()
            .ok_or_else(|| WineError::Prediction("empty prediction".into()))
    }

    fn predict_proba(&self, record: &FeatureRecord) -> WineResult<[f64; 2]> {
        let rows = FeatureRecord::to_matrix(std::slice::from_ref(record));
        let proba = self.predict_proba_matrix(rows.view())?;
        Ok([proba[[0, 0]], proba[[0, 1]]])
    }
}
