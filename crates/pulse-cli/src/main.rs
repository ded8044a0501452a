//! pulse batch binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite reporting store, and runs the full transfer sequence once. Any
//! fatal sync error propagates out as a non-zero exit.

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use pulse_client::{ApiClient, ApiConfig};
use pulse_core::{config::SyncConfig, sync, window::WallClock};
use pulse_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Incident-management reporting sync")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Settings read from the config file, overridable via `PULSE_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
struct Settings {
  /// Base URL of the remote API.
  api_base_url:   String,
  /// Static API token sent with every request.
  api_token:      String,
  /// Path to the SQLite reporting database.
  store_path:     PathBuf,
  #[serde(default = "default_page_size")]
  page_size:      u32,
  #[serde(default = "default_window_secs")]
  window_secs:    i64,
  #[serde(default = "default_overlap_secs")]
  overlap_secs:   i64,
  /// RFC 3339 start of history, used while the time-ordered tables are
  /// still empty.
  fallback_epoch: DateTime<Utc>,
}

fn default_page_size() -> u32 {
  100
}

fn default_window_secs() -> i64 {
  3600
}

fn default_overlap_secs() -> i64 {
  300
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PULSE"))
    .build()
    .context("failed to read configuration")?;

  let settings: Settings = settings
    .try_deserialize()
    .context("failed to deserialise settings")?;

  let store = SqliteStore::open(&settings.store_path).with_context(|| {
    format!("failed to open store at {:?}", settings.store_path)
  })?;

  let client = ApiClient::new(ApiConfig {
    base_url:  settings.api_base_url.clone(),
    token:     settings.api_token.clone(),
    page_size: settings.page_size,
  })
  .context("failed to build API client")?;

  let sync_cfg = SyncConfig {
    window_secs:    settings.window_secs,
    overlap_secs:   settings.overlap_secs,
    fallback_epoch: settings.fallback_epoch,
  };

  sync::run_all(&client, &store, &WallClock, &sync_cfg)
    .context("sync run failed")?;

  tracing::info!("transfer complete");
  Ok(())
}
