//! Error types for `pulse-core`.

use thiserror::Error;

/// A fatal sync failure.
///
/// Every variant aborts the current run; the orchestration boundary decides
/// exit behavior. Collaborator errors are folded into two classes rather
/// than enumerated — the run either fetched or it didn't, wrote or it
/// didn't.
#[derive(Debug, Error)]
pub enum Error {
  /// The remote fetch collaborator failed. Never retried; a failed window
  /// is never skipped.
  #[error("remote fetch failed: {0}")]
  Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The row sink failed on a write, a truncate, or the watermark query.
  #[error("reporting store failed: {0}")]
  Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn fetch(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Fetch(Box::new(err))
  }

  pub fn sink(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Sink(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
