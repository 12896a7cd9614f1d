use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

use crate::config::DataSource;
use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};

mod remote;

pub use remote::fetch_bytes;

/// Read a whole parquet file from `source` into memory.
///
/// This is the only I/O the loader performs: a local file read or a single
/// HTTP GET, depending on the source.
pub fn read_parquet(source: &DataSource, batch_size: Option<usize>) -> Result<Dataset> {
    debug!(%source, "reading parquet dataset");
    let dataset = match source {
        DataSource::Local(path) => read_local(path, batch_size)?,
        DataSource::Remote(url) => {
            let bytes = fetch_bytes(url)?;
            debug!(bytes = bytes.len(), "fetched remote dataset");
            decode(bytes, batch_size)?
        }
    };
    info!(
        %source,
        rows = dataset.num_rows(),
        columns = dataset.num_columns(),
        "loaded dataset"
    );
    Ok(dataset)
}

fn read_local(path: &Path, batch_size: Option<usize>) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| {
        let reason = match e.kind() {
            ErrorKind::NotFound => "file not found".to_string(),
            _ => e.to_string(),
        };
        DatasetError::unavailable(path.display().to_string(), reason)
    })?;
    decode(file, batch_size)
}

/// Decode parquet content into record batches.
pub fn decode<R: ChunkReader + 'static>(reader: R, batch_size: Option<usize>) -> Result<Dataset> {
    let mut builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;

    if let Some(size) = batch_size {
        builder = builder.with_batch_size(size);
    }

    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| DatasetError::Format(format!("Error reading batch: {}", e)))?;

    Ok(Dataset::new(schema, batches))
}
