//! Error types for `pulse-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  /// A stored `created_at` value that does not parse as RFC 3339. Fatal —
  /// the watermark cannot be trusted, so no incremental window may run.
  #[error("malformed stored timestamp {value:?}: {source}")]
  Timestamp {
    value:  String,
    source: chrono::ParseError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
