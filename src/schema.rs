//! The raw movie schema as published, and its canonical renaming.

use arrow::datatypes::{DataType, Schema};

use crate::error::{DatasetError, Result};

/// A raw source column and the canonical name it is renamed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub raw: &'static str,
    pub canonical: &'static str,
}

const fn mapping(raw: &'static str, canonical: &'static str) -> ColumnMapping {
    ColumnMapping { raw, canonical }
}

/// Every column the full load expects, in source order.
pub const MOVIE_COLUMNS: [ColumnMapping; 8] = [
    mapping("Release Year", "release_year"),
    mapping("Title", "title"),
    mapping("Origin/Ethnicity", "origin"),
    mapping("Director", "director"),
    mapping("Cast", "cast"),
    mapping("Genre", "genre"),
    mapping("Wiki Page", "wiki_page"),
    mapping("Plot", "plot"),
];

pub const CAST_COLUMN: &str = "cast";
pub const CAST_DELIMITER: &str = ",";
pub const GENRE_COLUMN: &str = "genre";
pub const GENRE_DELIMITER: &str = "/";

/// Look up the canonical name for a raw column.
pub fn canonical_name(raw: &str) -> Option<&'static str> {
    MOVIE_COLUMNS
        .iter()
        .find(|m| m.raw == raw)
        .map(|m| m.canonical)
}

pub(crate) fn is_string_type(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Utf8 | DataType::LargeUtf8)
}

/// Check that `schema` can be renamed to the canonical movie schema.
///
/// All eight raw columns must be present, no pass-through column may
/// already carry a canonical name, and the columns that get split must hold
/// strings.
pub fn validate_raw_schema(schema: &Schema) -> Result<()> {
    let missing: Vec<&str> = MOVIE_COLUMNS
        .iter()
        .filter(|m| schema.index_of(m.raw).is_err())
        .map(|m| m.raw)
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::SchemaMismatch(format!(
            "missing columns {:?}; available columns: {:?}",
            missing,
            schema.fields().iter().map(|f| f.name()).collect::<Vec<_>>()
        )));
    }

    if let Some(clash) = schema
        .fields()
        .iter()
        .find(|f| MOVIE_COLUMNS.iter().any(|m| m.canonical == f.name().as_str()))
    {
        return Err(DatasetError::SchemaMismatch(format!(
            "column '{}' already exists and would collide with a renamed column",
            clash.name()
        )));
    }

    for raw in ["Cast", "Genre"] {
        let field = schema.field_with_name(raw)?;
        if !is_string_type(field.data_type()) {
            return Err(DatasetError::SchemaMismatch(format!(
                "column '{}' must be a string column, found {}",
                raw,
                field.data_type()
            )));
        }
    }

    Ok(())
}
