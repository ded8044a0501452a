//! The row-sink collaborator contract.
//!
//! Implemented by storage backends (e.g. `pulse-store-sqlite`). The sync
//! tasks depend on this abstraction, not on any concrete backend.

use chrono::{DateTime, Utc};

use crate::row::{
  IncidentRow, LogEntryRow, PolicyRow, RuleRow, RuleScheduleRow, RuleUserRow,
  ScheduleRow, ServiceRow, Table, UserRow, UserScheduleRow,
};

/// Abstraction over the relational reporting store.
///
/// Writes are single-row and strictly sequential — there is no batching and
/// no concurrent access. Any failure is fatal to the run; callers do not
/// retry.
pub trait ReportingStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Clear a table ahead of a full refresh. Truncate-then-insert is the
  /// idempotency mechanism for the non-incremental tables.
  fn truncate(&self, table: Table) -> Result<(), Self::Error>;

  /// Latest `created_at` persisted in a time-ordered table, or `None` when
  /// the table is empty. A malformed stored timestamp is an error.
  fn last_created_at(
    &self,
    table: Table,
  ) -> Result<Option<DateTime<Utc>>, Self::Error>;

  fn insert_policy(&self, row: &PolicyRow) -> Result<(), Self::Error>;
  fn insert_rule(&self, row: &RuleRow) -> Result<(), Self::Error>;
  fn insert_rule_user(&self, row: &RuleUserRow) -> Result<(), Self::Error>;
  fn insert_rule_schedule(
    &self,
    row: &RuleScheduleRow,
  ) -> Result<(), Self::Error>;
  fn insert_user(&self, row: &UserRow) -> Result<(), Self::Error>;
  fn insert_service(&self, row: &ServiceRow) -> Result<(), Self::Error>;
  fn insert_schedule(&self, row: &ScheduleRow) -> Result<(), Self::Error>;
  fn insert_user_schedule(
    &self,
    row: &UserScheduleRow,
  ) -> Result<(), Self::Error>;
  fn insert_incident(&self, row: &IncidentRow) -> Result<(), Self::Error>;
  fn insert_log_entry(&self, row: &LogEntryRow) -> Result<(), Self::Error>;
}
