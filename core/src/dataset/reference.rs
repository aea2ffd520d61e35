use crate::features::{FeatureRecord, FEATURE_COUNT, FIELD_SPECS};
use crate::model::QualityClass;
use crate::prelude::{WineError, WineResult};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const QUALITY_COLUMN: &str = "quality";

/// One labeled row of the reference table, keyed by its position in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub index: usize,
    pub features: FeatureRecord,
    pub quality: QualityClass,
}

/// Static labeled table shown for orientation.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    rows: Vec<ReferenceRow>,
}

impl ReferenceDataset {
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        Self { rows }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> WineResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| WineError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        let dataset = Self::parse(&contents)?;
        LogManager::new("dataset").record(&format!(
            "loaded {} reference rows from {}",
            dataset.len(),
            path_ref.display()
        ));
        Ok(dataset)
    }

    /// Parses comma-separated text with a header row.
    ///
    /// The header must name every feature column and `quality`; the order is
    /// free and unknown columns are skipped. `quality` holds class labels.
    pub fn parse(contents: &str) -> WineResult<Self> {
        let mut lines = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| WineError::Dataset("file is empty".into()))?;
        let columns: Vec<String> = header.split(',').map(clean_cell).collect();

        let position = |name: &str| -> WineResult<usize> {
            columns
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| WineError::Dataset(format!("missing column {}", name)))
        };
        let mut feature_positions = [0usize; FEATURE_COUNT];
        for (slot, spec) in feature_positions.iter_mut().zip(FIELD_SPECS.iter()) {
            *slot = position(spec.name)?;
        }
        let quality_position = position(QUALITY_COLUMN)?;

        let mut rows = Vec::new();
        for (line_idx, line) in lines {
            let cells: Vec<String> = line.split(',').map(clean_cell).collect();
            if cells.len() != columns.len() {
                return Err(WineError::Dataset(format!(
                    "line {} has {} cells, header has {}",
                    line_idx + 1,
                    cells.len(),
                    columns.len()
                )));
            }

            let mut values = [0.0; FEATURE_COUNT];
            for (value, &col) in values.iter_mut().zip(feature_positions.iter()) {
                *value = cells[col].parse().map_err(|_| {
                    WineError::Dataset(format!(
                        "line {} column {}: {:?} is not a number",
                        line_idx + 1,
                        columns[col],
                        cells[col]
                    ))
                })?;
            }
            let quality: QualityClass = cells[quality_position].parse().map_err(|_| {
                WineError::Dataset(format!(
                    "line {}: quality {:?} is not a class label",
                    line_idx + 1,
                    cells[quality_position]
                ))
            })?;

            rows.push(ReferenceRow {
                index: rows.len(),
                features: FeatureRecord::from_values(values),
                quality,
            });
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn clean_cell(cell: &str) -> String {
    cell.trim().trim_matches('"').trim().to_string()
}
