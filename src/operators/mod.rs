use arrow::datatypes::{Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::schema::{CAST_COLUMN, CAST_DELIMITER, GENRE_COLUMN, GENRE_DELIMITER, MOVIE_COLUMNS};

#[macro_use]
mod macros;
pub mod rename;
pub mod split;

pub use rename::RenameColumns;
pub use split::{split_string_array, SplitToList};

/// A column transform applied batch by batch.
///
/// `output_schema` must describe exactly the batches `apply` produces, so a
/// dataset with no batches still ends up with the right schema.
pub trait Operator: Send + Sync {
    fn name(&self) -> &str;
    fn kind(&self) -> &str;
    fn output_schema(&self, input: &Schema) -> Result<SchemaRef>;
    fn apply(&self, batch: RecordBatch) -> Result<RecordBatch>;
}

/// Operators turning the raw movie schema into the canonical one, in order.
pub fn canonical_pipeline() -> Vec<Box<dyn Operator>> {
    let mapping = MOVIE_COLUMNS
        .iter()
        .map(|m| (m.raw.to_string(), m.canonical.to_string()))
        .collect();

    vec![
        Box::new(RenameColumns::new(mapping)),
        Box::new(SplitToList::new(CAST_COLUMN, CAST_DELIMITER)),
        Box::new(SplitToList::new(GENRE_COLUMN, GENRE_DELIMITER)),
    ]
}
