use arrow::array::{ArrayRef, UInt32Array};
use arrow::compute::{concat, concat_batches, take_record_batch};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use rand::Rng;
use rayon::prelude::*;

use crate::error::{DatasetError, Result};
use crate::movie::Movie;
use crate::operators::Operator;

/// An in-memory table: one Arrow schema and the record batches holding its rows.
///
/// Every loader call builds a fresh `Dataset`; nothing is shared between
/// calls.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Dataset {
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    pub fn from_batch(batch: RecordBatch) -> Self {
        Self {
            schema: batch.schema(),
            batches: vec![batch],
        }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// The full column across all batches, or `None` if there is no such column.
    pub fn column(&self, name: &str) -> Result<Option<ArrayRef>> {
        let idx = match self.schema.index_of(name) {
            Ok(idx) => idx,
            Err(_) => return Ok(None),
        };
        if self.batches.is_empty() {
            return Ok(Some(arrow::array::new_empty_array(
                self.schema.field(idx).data_type(),
            )));
        }
        let arrays: Vec<&dyn arrow::array::Array> =
            self.batches.iter().map(|b| b.column(idx).as_ref()).collect();
        Ok(Some(concat(&arrays)?))
    }

    /// All rows as a single record batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        Ok(concat_batches(&self.schema, &self.batches)?)
    }

    /// The first `n` rows (fewer if the dataset is shorter).
    pub fn head(&self, n: usize) -> Dataset {
        let mut remaining = n;
        let mut batches = Vec::new();
        for batch in &self.batches {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(batch.num_rows());
            batches.push(batch.slice(0, take));
            remaining -= take;
        }
        Dataset::new(self.schema.clone(), batches)
    }

    /// Draw `n` distinct rows uniformly at random.
    ///
    /// Asking for more rows than the dataset holds fails with
    /// `SampleOutOfRange` rather than silently returning fewer.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Dataset> {
        let available = self.num_rows();
        if n > available {
            return Err(DatasetError::SampleOutOfRange {
                requested: n,
                available,
            });
        }
        if n == 0 {
            return Ok(Dataset::new(self.schema.clone(), Vec::new()));
        }
        if available > u32::MAX as usize {
            return Err(DatasetError::Format(format!(
                "dataset of {} rows is too large to sample",
                available
            )));
        }

        let indices = rand::seq::index::sample(rng, available, n);
        let indices = UInt32Array::from_iter_values(indices.iter().map(|i| i as u32));

        let all = self.to_record_batch()?;
        let sampled = take_record_batch(&all, &indices)?;
        Ok(Dataset::new(self.schema.clone(), vec![sampled]))
    }

    /// Run `op` over every batch in parallel, keeping batch order.
    pub fn apply(&self, op: &dyn Operator) -> Result<Dataset> {
        let schema = op.output_schema(&self.schema)?;
        let batches = self
            .batches
            .par_iter()
            .map(|batch| op.apply(batch.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Dataset::new(schema, batches))
    }

    /// Decode canonical-schema rows into typed movies.
    pub fn movies(&self) -> Result<Vec<Movie>> {
        let mut movies = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            movies.extend(Movie::from_batch(batch)?);
        }
        Ok(movies)
    }
}
