use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{DatasetError, Result};

/// File name of the movie plots dataset with MiniLM embeddings.
pub const DATASET_FILE_NAME: &str = "movies_plots_dataset_embd_minilm.parquet";

/// Raw-content directory the dataset is published under.
pub const REMOTE_BASE_URL: &str =
    "https://raw.githubusercontent.com/xtreamsrl/ace-of-splades/main/data/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub file_name: String,
    pub remote_base_url: String,
    /// Overrides `<install-root>/data` for local loads.
    pub data_dir: Option<PathBuf>,
    /// Rows per record batch when decoding Parquet.
    pub batch_size: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            file_name: DATASET_FILE_NAME.to_string(),
            remote_base_url: REMOTE_BASE_URL.to_string(),
            data_dir: None,
            batch_size: None,
        }
    }
}

/// Where a dataset is read from. Resolving one does no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Local(PathBuf),
    Remote(Url),
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Local(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

impl LoaderConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            DatasetError::Config(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: LoaderConfig = serde_yaml::from_str(content)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(DatasetError::Config("file_name must not be empty".into()));
        }
        if !self.file_name.ends_with(".parquet") {
            return Err(DatasetError::Config(format!(
                "file_name '{}' is not a parquet file",
                self.file_name
            )));
        }
        if self.file_name.contains('/') || self.file_name.contains('\\') {
            return Err(DatasetError::Config(format!(
                "file_name '{}' must be a bare file name",
                self.file_name
            )));
        }

        let base = Url::parse(&self.remote_base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(DatasetError::Config(format!(
                "remote_base_url must be http(s), got scheme '{}'",
                base.scheme()
            )));
        }

        if self.batch_size == Some(0) {
            return Err(DatasetError::Config("batch_size must be > 0".into()));
        }

        Ok(())
    }

    /// Directory holding the local copy of the dataset.
    ///
    /// Defaults to `data/` under the install root, which is the directory
    /// containing this crate's manifest.
    pub fn local_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => Path::new(env!("CARGO_MANIFEST_DIR")).join("data"),
        }
    }

    pub fn resolve(&self, local: bool) -> Result<DataSource> {
        if local {
            return Ok(DataSource::Local(self.local_data_dir().join(&self.file_name)));
        }

        // Url::join drops the last segment unless the base ends with '/'
        let base = if self.remote_base_url.ends_with('/') {
            Url::parse(&self.remote_base_url)?
        } else {
            Url::parse(&format!("{}/", self.remote_base_url))?
        };
        Ok(DataSource::Remote(base.join(&self.file_name)?))
    }
}
