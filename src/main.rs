use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use movies_dataset::{Dataset, DatasetLoader, LoaderConfig, Movie};

#[derive(Parser)]
#[command(name = "movies")]
#[command(about = "Inspect the movie plots dataset with MiniLM embeddings", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Read from <install-root>/data instead of the published copy
    #[arg(long)]
    local: bool,

    /// Loader configuration YAML
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical column names and types
    Schema {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the first movies as JSON lines
    Head {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of movies to print
        #[arg(short, default_value_t = 5)]
        n: usize,

        /// Include the embedding vector in the output
        #[arg(long)]
        with_embedding: bool,
    },
    /// Draw a random sample of raw rows and summarize it
    Sample {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of rows to sample
        #[arg(short)]
        n: usize,
    },
    /// Show version information
    Version,
}

fn setup_logging(verbose: bool, quiet: bool) -> Result<()> {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn loader(source: &SourceArgs) -> Result<DatasetLoader> {
    let config = match &source.config {
        Some(path) => LoaderConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => LoaderConfig::default(),
    };
    Ok(DatasetLoader::new(config)?)
}

/// Run `load` behind a spinner; fetching the published copy can take a while.
fn with_spinner<F>(message: String, quiet: bool, load: F) -> Result<Dataset>
where
    F: FnOnce() -> movies_dataset::Result<Dataset>,
{
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = load();
    pb.finish_and_clear();
    Ok(result?)
}

fn print_schema(dataset: &Dataset) {
    for field in dataset.schema().fields() {
        println!("{:<20} {}", field.name(), field.data_type());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Schema { source } => {
            let loader = loader(&source)?;
            let location = loader.source(source.local)?;
            let dataset = with_spinner(format!("Loading {}", location), cli.quiet, || {
                loader.load(0, source.local)
            })?;
            print_schema(&dataset);
            println!("rows: {}", dataset.num_rows());
        }
        Commands::Head {
            source,
            n,
            with_embedding,
        } => {
            let loader = loader(&source)?;
            let location = loader.source(source.local)?;
            let dataset = with_spinner(format!("Loading {}", location), cli.quiet, || {
                loader.load(0, source.local)
            })?;
            for movie in dataset.head(n).movies()? {
                let movie = if with_embedding {
                    movie
                } else {
                    Movie {
                        embedding: None,
                        ..movie
                    }
                };
                println!("{}", serde_json::to_string(&movie)?);
            }
        }
        Commands::Sample { source, n } => {
            anyhow::ensure!(n > 0, "sample size must be greater than zero");
            let loader = loader(&source)?;
            let location = loader.source(source.local)?;
            let dataset = with_spinner(format!("Sampling {}", location), cli.quiet, || {
                loader.load(n, source.local)
            })?;
            print_schema(&dataset);
            println!("rows: {}", dataset.num_rows());
        }
        Commands::Version => {
            println!("movies version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
