use rand::Rng;
use tracing::debug;

use crate::config::{DataSource, LoaderConfig};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::io;
use crate::operators::canonical_pipeline;
use crate::schema::validate_raw_schema;

/// Loads the movie plots dataset and normalizes it to the canonical schema.
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Where `load` would read from. No I/O.
    pub fn source(&self, local: bool) -> Result<DataSource> {
        self.config.resolve(local)
    }

    /// Read the dataset as published, with its raw column names.
    pub fn read_raw(&self, local: bool) -> Result<Dataset> {
        let source = self.source(local)?;
        io::read_parquet(&source, self.config.batch_size)
    }

    /// Load the dataset.
    ///
    /// With `sample > 0`, returns that many random rows in the raw schema.
    /// Otherwise returns every row in the canonical schema.
    pub fn load(&self, sample: usize, local: bool) -> Result<Dataset> {
        self.load_with_rng(sample, local, &mut rand::thread_rng())
    }

    /// Like `load`, drawing any sample from `rng`.
    pub fn load_with_rng<R: Rng + ?Sized>(
        &self,
        sample: usize,
        local: bool,
        rng: &mut R,
    ) -> Result<Dataset> {
        let raw = self.read_raw(local)?;

        if sample > 0 {
            debug!(sample, rows = raw.num_rows(), "sampling raw dataset");
            return raw.sample(sample, rng);
        }

        normalize(&raw)
    }
}

/// Rename the raw movie columns and split `cast`/`genre` into lists.
pub fn normalize(raw: &Dataset) -> Result<Dataset> {
    validate_raw_schema(raw.schema())?;

    let mut dataset = raw.clone();
    for op in canonical_pipeline() {
        debug!(operator = op.name(), kind = op.kind(), "applying operator");
        dataset = dataset.apply(op.as_ref())?;
    }
    Ok(dataset)
}

/// Load the movie plots dataset with its MiniLM embeddings.
///
/// `sample > 0` returns that many randomly chosen rows with the raw column
/// names. `sample == 0` returns the whole dataset with canonical snake_case
/// columns, `cast` split on `,` and `genre` split on `/`. `local` reads from
/// `<install-root>/data/` instead of the published copy on GitHub.
pub fn get_movies_dataset(sample: usize, local: bool) -> Result<Dataset> {
    DatasetLoader::default().load(sample, local)
}
