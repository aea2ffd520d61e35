use crate::dataset::reference::{ReferenceDataset, ReferenceRow};
use crate::prelude::{WineError, WineResult};
use rand::{rngs::StdRng, seq::index, SeedableRng};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLE_SIZE: usize = 5;
pub const DEFAULT_SAMPLE_SEED: u64 = 33;

/// Rows drawn without replacement from the reference table, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSample {
    pub seed: u64,
    pub rows: Vec<ReferenceRow>,
}

impl ReferenceSample {
    /// Draws `size` distinct rows; the same seed and table always give the
    /// same rows in the same order.
    pub fn draw(dataset: &ReferenceDataset, size: usize, seed: u64) -> WineResult<Self> {
        if size > dataset.len() {
            return Err(WineError::Dataset(format!(
                "cannot sample {} rows from a table of {}",
                size,
                dataset.len()
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let rows = index::sample(&mut rng, dataset.len(), size)
            .into_iter()
            .map(|idx| dataset.rows()[idx].clone())
            .collect();
        Ok(Self { seed, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
