//! Parquet fixtures shaped like the published movie dataset.
#![allow(dead_code)]

use arrow::array::{ArrayRef, FixedSizeListBuilder, Float32Builder, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use movies_dataset::{DatasetLoader, LoaderConfig, DATASET_FILE_NAME};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const EMBEDDING_DIM: i32 = 4;

pub struct RawMovie {
    pub release_year: i64,
    pub title: String,
    pub origin: String,
    pub director: String,
    pub cast: String,
    pub genre: String,
    pub wiki_page: String,
    pub plot: String,
}

impl RawMovie {
    pub fn new(release_year: i64, title: &str, cast: &str, genre: &str) -> Self {
        Self {
            release_year,
            title: title.to_string(),
            origin: "American".to_string(),
            director: "Unknown".to_string(),
            cast: cast.to_string(),
            genre: genre.to_string(),
            wiki_page: format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_")),
            plot: format!("The plot of {}.", title),
        }
    }
}

/// `n` movies numbered by release year starting at 1900.
pub fn numbered_movies(n: usize) -> Vec<RawMovie> {
    (0..n)
        .map(|i| {
            RawMovie::new(
                1900 + i as i64,
                &format!("Movie {}", i),
                &format!("Actor {},Actress {}", i, i),
                "drama/comedy",
            )
        })
        .collect()
}

pub fn raw_batch(movies: &[RawMovie]) -> RecordBatch {
    let text = |f: fn(&RawMovie) -> &str| {
        Arc::new(StringArray::from_iter_values(movies.iter().map(f))) as ArrayRef
    };

    let mut embedding = FixedSizeListBuilder::new(Float32Builder::new(), EMBEDDING_DIM);
    for (i, _) in movies.iter().enumerate() {
        for d in 0..EMBEDDING_DIM {
            embedding.values().append_value(i as f32 + d as f32 / 10.0);
        }
        embedding.append(true);
    }

    RecordBatch::try_from_iter(vec![
        (
            "Release Year",
            Arc::new(Int64Array::from_iter_values(
                movies.iter().map(|m| m.release_year),
            )) as ArrayRef,
        ),
        ("Title", text(|m| m.title.as_str())),
        ("Origin/Ethnicity", text(|m| m.origin.as_str())),
        ("Director", text(|m| m.director.as_str())),
        ("Cast", text(|m| m.cast.as_str())),
        ("Genre", text(|m| m.genre.as_str())),
        ("Wiki Page", text(|m| m.wiki_page.as_str())),
        ("Plot", text(|m| m.plot.as_str())),
        ("embeddings", Arc::new(embedding.finish()) as ArrayRef),
    ])
    .expect("fixture batch")
}

fn writer_props() -> WriterProperties {
    WriterProperties::builder()
        .set_max_row_group_size(16)
        .build()
}

pub fn write_parquet(batch: &RecordBatch, path: &Path) {
    let file = File::create(path).expect("create fixture file");
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), Some(writer_props())).expect("writer");
    writer.write(batch).expect("write fixture");
    writer.close().expect("close fixture");
}

/// The same fixture encoding as `write_parquet`, kept in memory.
pub fn parquet_bytes(batch: &RecordBatch) -> Vec<u8> {
    let mut writer =
        ArrowWriter::try_new(Vec::new(), batch.schema(), Some(writer_props())).expect("writer");
    writer.write(batch).expect("write fixture");
    writer.into_inner().expect("finish fixture")
}

/// A temp `data/` directory holding the dataset file, and a loader pointed at it.
pub fn fixture(batch: &RecordBatch) -> (TempDir, DatasetLoader) {
    let dir = tempfile::tempdir().expect("tempdir");
    write_parquet(batch, &dir.path().join(DATASET_FILE_NAME));
    let loader = DatasetLoader::new(LoaderConfig {
        data_dir: Some(dir.path().to_path_buf()),
        batch_size: Some(8),
        ..LoaderConfig::default()
    })
    .expect("loader");
    (dir, loader)
}
