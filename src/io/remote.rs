use bytes::Bytes;
use object_store::http::HttpBuilder;
use object_store::path::Path as ObjectPath;
use object_store::{ClientOptions, ObjectStore, RetryConfig};
use url::Url;

use crate::error::{DatasetError, Result};

/// Fetch the object at `url` over HTTP(S).
///
/// Runs a private current-thread runtime and blocks on it. Plain `http` is
/// accepted as well as `https`. The first transport error or non-success
/// status surfaces as `SourceUnavailable`; requests are never retried.
pub fn fetch_bytes(url: &Url) -> Result<Bytes> {
    let location = url.to_string();
    let unavailable = |e: object_store::Error| DatasetError::unavailable(&location, e);

    let origin = &url[..url::Position::BeforePath];
    let store = HttpBuilder::new()
        .with_url(origin)
        .with_client_options(ClientOptions::new().with_allow_http(true))
        .with_retry(RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        })
        .build()
        .map_err(unavailable)?;
    let path = ObjectPath::from_url_path(url.path())
        .map_err(|e| DatasetError::Config(format!("invalid object path in {}: {}", url, e)))?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| DatasetError::unavailable(&location, format!("async runtime: {}", e)))?;

    rt.block_on(async {
        let result = store.get(&path).await?;
        result.bytes().await
    })
    .map_err(unavailable)
}
