pub mod reference;
pub mod sample;

pub use reference::{ReferenceDataset, ReferenceRow, QUALITY_COLUMN};
pub use sample::{ReferenceSample, DEFAULT_SAMPLE_SEED, DEFAULT_SAMPLE_SIZE};
