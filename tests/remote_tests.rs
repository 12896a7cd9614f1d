//! Loading the dataset over HTTP from a throwaway server on 127.0.0.1.

mod common;

use arrow::array::AsArray;
use arrow::datatypes::Int64Type;
use common::{numbered_movies, parquet_bytes, raw_batch};
use movies_dataset::{DataSource, DatasetError, DatasetLoader, LoaderConfig, DATASET_FILE_NAME};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Minimal HTTP/1.1 server answering every request with a canned response
/// keyed by path. Unknown paths get a 404.
struct TestServer {
    port: u16,
    requests: Arc<AtomicUsize>,
}

impl TestServer {
    fn start(routes: HashMap<String, (u16, Vec<u8>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let port = listener.local_addr().expect("local addr").port();
        let requests = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = respond(stream, &routes);
            }
        });

        Self { port, requests }
    }

    fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}/data/", self.port)
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn loader(&self) -> DatasetLoader {
        DatasetLoader::new(LoaderConfig {
            remote_base_url: self.base_url(),
            ..LoaderConfig::default()
        })
        .expect("loader")
    }
}

fn respond(stream: TcpStream, routes: &HashMap<String, (u16, Vec<u8>)>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header == "\r\n" {
            break;
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let (status, body) = routes
        .get(path)
        .map(|(status, body)| (*status, body.as_slice()))
        .unwrap_or((404, b"not found".as_slice()));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        503 => "Service Unavailable",
        _ => "Unknown",
    };

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    )?;
    stream.write_all(body)?;
    stream.flush()
}

fn dataset_path() -> String {
    format!("/data/{}", DATASET_FILE_NAME)
}

fn serving(status: u16, body: Vec<u8>) -> TestServer {
    TestServer::start(HashMap::from([(dataset_path(), (status, body))]))
}

#[test]
fn test_remote_full_load_returns_canonical_schema() {
    let server = serving(200, parquet_bytes(&raw_batch(&numbered_movies(20))));
    let loader = server.loader();

    match loader.source(false).unwrap() {
        DataSource::Remote(url) => assert_eq!(url.scheme(), "http"),
        other => panic!("expected a remote source, got {}", other),
    }

    let dataset = loader.load(0, false).unwrap();

    assert_eq!(dataset.num_rows(), 20);
    assert_eq!(
        dataset.column_names(),
        vec![
            "release_year",
            "title",
            "origin",
            "director",
            "cast",
            "genre",
            "wiki_page",
            "plot",
            "embeddings"
        ]
    );
    let years = dataset.column("release_year").unwrap().unwrap();
    assert_eq!(years.as_primitive::<Int64Type>().value(19), 1919);

    let movies = dataset.movies().unwrap();
    assert_eq!(
        movies[7].cast,
        Some(vec!["Actor 7".to_string(), "Actress 7".to_string()])
    );
    assert_eq!(server.requests(), 1);
}

#[test]
fn test_remote_sample_returns_raw_schema() {
    let server = serving(200, parquet_bytes(&raw_batch(&numbered_movies(50))));

    let dataset = server.loader().load(5, false).unwrap();

    assert_eq!(dataset.num_rows(), 5);
    assert!(dataset.column_names().contains(&"Release Year"));
    assert!(!dataset.column_names().contains(&"release_year"));
}

#[test]
fn test_remote_not_found_is_source_unavailable() {
    let server = TestServer::start(HashMap::new());

    match server.loader().load(0, false) {
        Err(DatasetError::SourceUnavailable { location, .. }) => {
            assert!(location.ends_with(DATASET_FILE_NAME));
        }
        other => panic!("expected SourceUnavailable, got {:?}", other),
    }
    assert_eq!(server.requests(), 1);
}

#[test]
fn test_remote_server_error_is_not_retried() {
    let server = serving(503, b"try later".to_vec());

    assert!(matches!(
        server.loader().load(0, false),
        Err(DatasetError::SourceUnavailable { .. })
    ));
    assert_eq!(server.requests(), 1);
}

#[test]
fn test_remote_non_parquet_body_is_format_error() {
    let server = serving(200, b"Title,Cast\nx,y\n".to_vec());

    assert!(matches!(
        server.loader().load(0, false),
        Err(DatasetError::Format(_))
    ));
}

#[test]
fn test_remote_connection_refused_is_source_unavailable() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let loader = DatasetLoader::new(LoaderConfig {
        remote_base_url: format!("http://127.0.0.1:{}/data/", port),
        ..LoaderConfig::default()
    })
    .unwrap();

    let started = Instant::now();
    assert!(matches!(
        loader.load(0, false),
        Err(DatasetError::SourceUnavailable { .. })
    ));
    // a single attempt; backing off between retries would take seconds
    assert!(started.elapsed() < Duration::from_secs(2));
}
