//! The incremental window walker.
//!
//! Time-ordered collections (incidents, log entries) are synced in
//! fixed-width windows starting from a persisted watermark, so a long
//! catch-up becomes many bounded fetches instead of one unbounded one.

use chrono::{DateTime, Duration, Utc};

/// Source of "now". The walker re-reads it at the start of every step
/// rather than snapshotting, so the final window may be short (or the loop
/// may run one more or fewer iteration) under wall-clock drift.
pub trait Clock {
  fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Where an incremental sync resumes: the latest persisted timestamp (or
/// the fallback epoch when the table is empty), pulled back by the overlap
/// buffer to tolerate fetch races at the previous run's boundary.
pub fn resume_point(
  last: Option<DateTime<Utc>>,
  fallback: DateTime<Utc>,
  overlap: Duration,
) -> DateTime<Utc> {
  last.unwrap_or(fallback) - overlap
}

/// Step `[from, from + width)` windows forward from `start` until `from`
/// catches up with the clock, invoking `step` once per window.
///
/// Windows abut exactly: the next `from` is the previous `to`, so coverage
/// of `[start, now)` has no gaps and no overlaps. A failed step aborts
/// immediately — windows are never skipped or retried.
pub fn walk<C, E, F>(
  clock: &C,
  start: DateTime<Utc>,
  width: Duration,
  mut step: F,
) -> Result<(), E>
where
  C: Clock,
  F: FnMut(DateTime<Utc>, DateTime<Utc>) -> Result<(), E>,
{
  let mut from = start;
  let mut to = from + width;

  while from < clock.now() {
    step(from, to)?;
    from = to;
    to = from + width;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  struct FixedClock(DateTime<Utc>);

  impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
      self.0
    }
  }

  fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
  }

  #[test]
  fn two_full_windows_then_stop() {
    let start = epoch();
    let clock = FixedClock(start + Duration::seconds(7200));
    let mut windows = Vec::new();

    walk::<_, (), _>(&clock, start, Duration::seconds(3600), |from, to| {
      windows.push((from, to));
      Ok(())
    })
    .unwrap();

    assert_eq!(windows, vec![
      (start, start + Duration::seconds(3600)),
      (start + Duration::seconds(3600), start + Duration::seconds(7200)),
    ]);
  }

  #[test]
  fn windows_abut_with_no_gaps_or_overlaps() {
    let start = epoch();
    let clock = FixedClock(start + Duration::seconds(10_000));
    let mut windows = Vec::new();

    walk::<_, (), _>(&clock, start, Duration::seconds(3600), |from, to| {
      windows.push((from, to));
      Ok(())
    })
    .unwrap();

    assert_eq!(windows.first().unwrap().0, start);
    for pair in windows.windows(2) {
      assert_eq!(pair[0].1, pair[1].0);
    }
    // The last window begins before "now" and the next would not.
    let (last_from, last_to) = *windows.last().unwrap();
    assert!(last_from < clock.now());
    assert!(last_to >= clock.now());
  }

  #[test]
  fn no_step_when_start_is_not_before_now() {
    let start = epoch();
    let clock = FixedClock(start);
    let mut calls = 0;

    walk::<_, (), _>(&clock, start, Duration::seconds(60), |_, _| {
      calls += 1;
      Ok(())
    })
    .unwrap();

    assert_eq!(calls, 0);
  }

  #[test]
  fn step_failure_aborts_without_advancing() {
    let start = epoch();
    let clock = FixedClock(start + Duration::seconds(7200));
    let mut calls = 0;

    let result = walk(&clock, start, Duration::seconds(3600), |_, _| {
      calls += 1;
      Err("remote down")
    });

    assert_eq!(result, Err("remote down"));
    assert_eq!(calls, 1);
  }

  #[test]
  fn resume_point_uses_watermark_minus_overlap() {
    let watermark = epoch() + Duration::seconds(5000);
    let at = resume_point(Some(watermark), epoch(), Duration::seconds(300));
    assert_eq!(at, watermark - Duration::seconds(300));
  }

  #[test]
  fn resume_point_falls_back_to_epoch_when_empty() {
    let at = resume_point(None, epoch(), Duration::seconds(300));
    assert_eq!(at, epoch() - Duration::seconds(300));
  }
}
