//! Error types for `pulse-client`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http transport error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("GET {path} returned {status}")]
  Status { path: String, status: StatusCode },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
