use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float32Type, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{DatasetError, Result};
use crate::schema::MOVIE_COLUMNS;

/// One row of the canonical movie schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub release_year: Option<i64>,
    pub title: Option<String>,
    pub origin: Option<String>,
    pub director: Option<String>,
    pub cast: Option<Vec<String>>,
    pub genre: Option<Vec<String>>,
    pub wiki_page: Option<String>,
    pub plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// Name of the first column outside the movie columns that holds a list of floats.
pub fn embedding_column(schema: &Schema) -> Option<&str> {
    schema
        .fields()
        .iter()
        .filter(|f| {
            !MOVIE_COLUMNS
                .iter()
                .any(|m| m.canonical == f.name().as_str() || m.raw == f.name().as_str())
        })
        .find(|f| match f.data_type() {
            DataType::List(item) | DataType::LargeList(item) | DataType::FixedSizeList(item, _) => {
                item.data_type().is_floating()
            }
            _ => false,
        })
        .map(|f| f.name().as_str())
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch.column_by_name(name).ok_or_else(|| {
        DatasetError::SchemaMismatch(format!("Column {} not found in canonical dataset", name))
    })
}

fn as_strings(batch: &RecordBatch, name: &str) -> Result<Vec<Option<String>>> {
    let array = cast(column(batch, name)?, &DataType::Utf8)?;
    Ok(array
        .as_string::<i32>()
        .iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn as_string_lists(batch: &RecordBatch, name: &str) -> Result<Vec<Option<Vec<String>>>> {
    let target = DataType::new_list(DataType::Utf8, true);
    let array = cast(column(batch, name)?, &target)?;
    let list = array.as_list::<i32>();
    Ok((0..list.len())
        .map(|row| {
            if list.is_null(row) {
                return None;
            }
            let values = list.value(row);
            Some(
                values
                    .as_string::<i32>()
                    .iter()
                    .map(|s| s.unwrap_or_default().to_string())
                    .collect(),
            )
        })
        .collect())
}

fn as_float_lists(array: &ArrayRef) -> Result<Vec<Option<Vec<f32>>>> {
    let target = DataType::List(Arc::new(Field::new_list_field(DataType::Float32, true)));
    let array = cast(array, &target)?;
    let list = array.as_list::<i32>();
    (0..list.len())
        .map(|row| {
            if list.is_null(row) {
                return Ok(None);
            }
            let values = list.value(row);
            let values = values.as_primitive::<Float32Type>();
            if values.null_count() > 0 {
                return Err(DatasetError::Format(format!(
                    "embedding at row {} has {} null elements",
                    row,
                    values.null_count()
                )));
            }
            Ok(Some(values.values().to_vec()))
        })
        .collect()
}

impl Movie {
    /// Decode every row of a canonical-schema batch.
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<Movie>> {
        let years = cast(column(batch, "release_year")?, &DataType::Int64)?;
        let years = years.as_primitive::<Int64Type>();
        let titles = as_strings(batch, "title")?;
        let origins = as_strings(batch, "origin")?;
        let directors = as_strings(batch, "director")?;
        let casts = as_string_lists(batch, "cast")?;
        let genres = as_string_lists(batch, "genre")?;
        let wiki_pages = as_strings(batch, "wiki_page")?;
        let plots = as_strings(batch, "plot")?;
        let embeddings = match embedding_column(batch.schema_ref()) {
            Some(name) => Some(as_float_lists(column(batch, name)?)?),
            None => None,
        };

        let mut titles = titles.into_iter();
        let mut origins = origins.into_iter();
        let mut directors = directors.into_iter();
        let mut casts = casts.into_iter();
        let mut genres = genres.into_iter();
        let mut wiki_pages = wiki_pages.into_iter();
        let mut plots = plots.into_iter();
        let mut embeddings = embeddings.map(|e| e.into_iter());

        let movies = (0..batch.num_rows())
            .map(|row| Movie {
                release_year: (!years.is_null(row)).then(|| years.value(row)),
                title: titles.next().flatten(),
                origin: origins.next().flatten(),
                director: directors.next().flatten(),
                cast: casts.next().flatten(),
                genre: genres.next().flatten(),
                wiki_page: wiki_pages.next().flatten(),
                plot: plots.next().flatten(),
                embedding: embeddings.as_mut().and_then(|e| e.next().flatten()),
            })
            .collect();
        Ok(movies)
    }
}
