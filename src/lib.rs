//! Loader for the movie plots dataset with precomputed MiniLM embeddings.
//!
//! ```no_run
//! let movies = movies_dataset::get_movies_dataset(0, false)?;
//! println!("{:?}", movies.column_names());
//! # Ok::<(), movies_dataset::DatasetError>(())
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod loader;
pub mod movie;
pub mod operators;
pub mod schema;

pub use config::{DataSource, LoaderConfig, DATASET_FILE_NAME, REMOTE_BASE_URL};
pub use dataset::Dataset;
pub use error::{DatasetError, Result};
pub use loader::{get_movies_dataset, normalize, DatasetLoader};
pub use movie::Movie;
pub use schema::{ColumnMapping, MOVIE_COLUMNS};
