//! Immutable sync tuning parameters.
//!
//! Constructed once at startup and passed by reference into the components
//! that need it. There is no ambient global configuration.

use chrono::{DateTime, Duration, Utc};

/// Tuning knobs for one sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
  /// Width of one incremental window, in seconds. A throughput control
  /// against the remote API, not a business rule: a watermark far in the
  /// past becomes many small windows rather than one unbounded fetch.
  pub window_secs:    i64,
  /// Overlap subtracted from the resume point so records landing near the
  /// boundary during the previous run are fetched again, in seconds.
  pub overlap_secs:   i64,
  /// Start of history used when a time-ordered table is still empty.
  pub fallback_epoch: DateTime<Utc>,
}

impl SyncConfig {
  pub fn window(&self) -> Duration {
    Duration::seconds(self.window_secs)
  }

  pub fn overlap(&self) -> Duration {
    Duration::seconds(self.overlap_secs)
  }
}
