pub mod forest;
pub mod prediction;

pub use forest::{ForestArtifact, RandomForest, TreeArrays};
pub use prediction::{PredictionResult, QualityClass};
