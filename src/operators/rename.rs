use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DatasetError, Result};

/// Renames columns in place; unmapped columns pass through untouched.
pub struct RenameColumns {
    mapping: HashMap<String, String>, // original_name -> new_name
}

impl RenameColumns {
    pub fn new(mapping: HashMap<String, String>) -> Self {
        Self { mapping }
    }

    fn rename_schema(&self, schema: &Schema) -> Result<SchemaRef> {
        for original in self.mapping.keys() {
            if schema.index_of(original).is_err() {
                return Err(DatasetError::SchemaMismatch(format!(
                    "cannot rename missing column '{}'",
                    original
                )));
            }
        }

        let fields: Vec<Field> = schema
            .fields()
            .iter()
            .map(|f| match self.mapping.get(f.name()) {
                Some(new_name) => f.as_ref().clone().with_name(new_name),
                None => f.as_ref().clone(),
            })
            .collect();

        Ok(Arc::new(Schema::new_with_metadata(
            fields,
            schema.metadata().clone(),
        )))
    }
}

impl_operator! {
    RenameColumns,
    name: "rename-columns",
    kind: "transformer",
    output_schema: |self, schema| { self.rename_schema(schema) },
    apply: |self, batch| {
        let schema = self.rename_schema(&batch.schema())?;
        Ok(RecordBatch::try_new(schema, batch.columns().to_vec())?)
    }
}
