use arrow::array::{
    Array, ArrayRef, AsArray, GenericListBuilder, GenericStringArray, GenericStringBuilder,
    OffsetSizeTrait,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::error::{DatasetError, Result};
use crate::schema::is_string_type;

/// Replaces a string column with a list of its delimiter-separated parts.
///
/// Parts are kept as-is (no trimming), an empty string becomes `[""]` and
/// nulls stay null.
pub struct SplitToList {
    column: String,
    delimiter: String,
}

impl SplitToList {
    pub fn new(column: impl Into<String>, delimiter: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            delimiter: delimiter.into(),
        }
    }

    fn column_index(&self, schema: &Schema) -> Result<usize> {
        let idx = schema.index_of(&self.column).map_err(|_| {
            DatasetError::SchemaMismatch(format!("Column {} not found", self.column))
        })?;
        let data_type = schema.field(idx).data_type();
        if !is_string_type(data_type) {
            return Err(DatasetError::SchemaMismatch(format!(
                "Column {} is not a string column ({})",
                self.column, data_type
            )));
        }
        Ok(idx)
    }

    fn split_schema(&self, schema: &Schema) -> Result<SchemaRef> {
        let idx = self.column_index(schema)?;
        let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
        let field = schema.field(idx);
        fields[idx] = Field::new(
            field.name(),
            list_type(field.data_type()),
            field.is_nullable(),
        )
        .with_metadata(field.metadata().clone());
        Ok(Arc::new(Schema::new_with_metadata(
            fields,
            schema.metadata().clone(),
        )))
    }
}

impl_operator! {
    SplitToList,
    name: "split-to-list",
    kind: "transformer",
    output_schema: |self, schema| { self.split_schema(schema) },
    apply: |self, batch| {
        let schema = self.split_schema(&batch.schema())?;
        let idx = self.column_index(&batch.schema())?;

        let mut columns = batch.columns().to_vec();
        columns[idx] = split_string_array(batch.column(idx), &self.delimiter)?;

        Ok(RecordBatch::try_new(schema, columns)?)
    }
}

/// List type produced when splitting a column of `string_type`.
fn list_type(string_type: &DataType) -> DataType {
    DataType::new_list(string_type.clone(), true)
}

/// Split every value of a Utf8/LargeUtf8 array on `delimiter`.
pub fn split_string_array(array: &ArrayRef, delimiter: &str) -> Result<ArrayRef> {
    match array.data_type() {
        DataType::Utf8 => Ok(split_generic(array.as_string::<i32>(), delimiter)),
        DataType::LargeUtf8 => Ok(split_generic(array.as_string::<i64>(), delimiter)),
        other => Err(DatasetError::SchemaMismatch(format!(
            "cannot split a {} array",
            other
        ))),
    }
}

fn split_generic<O: OffsetSizeTrait>(
    array: &GenericStringArray<O>,
    delimiter: &str,
) -> ArrayRef {
    let values = GenericStringBuilder::<O>::with_capacity(array.len(), array.value_data().len());
    let mut builder = GenericListBuilder::<i32, _>::with_capacity(values, array.len());

    for value in array.iter() {
        match value {
            Some(text) => {
                for part in text.split(delimiter) {
                    builder.values().append_value(part);
                }
                builder.append(true);
            }
            None => builder.append_null(),
        }
    }

    Arc::new(builder.finish())
}
