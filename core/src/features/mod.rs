pub mod record;
pub mod schema;

pub use record::FeatureRecord;
pub use schema::{feature_names, field_spec, FieldSpec, FEATURE_COUNT, FIELD_SPECS};
