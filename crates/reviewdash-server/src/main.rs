//! reviewdash server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, ingests the CSV source, and serves the JSON API over HTTP.
//!
//! # One-off load
//!
//! To refresh the database without serving:
//!
//! ```text
//! cargo run -p reviewdash-server -- --load-only --source exports/latest.csv
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use reviewdash_server::{ServerConfig, app};
use reviewdash_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Restaurant review dashboard server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// CSV source to ingest; overrides `source_path` from the config.
  #[arg(short, long)]
  source: Option<PathBuf>,

  /// Ingest the source and exit without serving.
  #[arg(long, conflicts_with = "no_load")]
  load_only: bool,

  /// Serve the existing database without ingesting at startup.
  #[arg(long)]
  no_load: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg = ServerConfig::load(&cli.config)?;
  if let Some(source) = cli.source {
    server_cfg.source_path = source;
  }
  if cli.no_load {
    server_cfg.load_on_start = false;
  }

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;

  if cli.load_only {
    let report = reviewdash_csv::load_path(&store, &server_cfg.source_path)
      .await
      .with_context(|| format!("failed to load {:?}", server_cfg.source_path))?;
    println!("loaded {} reviews, skipped {}", report.loaded, report.skipped);
    return Ok(());
  }

  if server_cfg.load_on_start {
    // A bad source should not keep the dashboard down; serve what is stored.
    if let Err(e) = reviewdash_csv::load_path(&store, &server_cfg.source_path).await {
      tracing::error!(
        error = %e,
        path = %server_cfg.source_path.display(),
        "startup load failed"
      );
    }
  }

  let app = app(Arc::new(store), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
