//! [`SqliteStore`] — the SQLite implementation of [`ReportingStore`].

use std::{
  path::Path,
  sync::{Mutex, PoisonError},
};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension as _, params};

use pulse_core::{
  row::{
    IncidentRow, LogEntryRow, PolicyRow, RuleRow, RuleScheduleRow,
    RuleUserRow, ScheduleRow, ServiceRow, Table, UserRow, UserScheduleRow,
  },
  store::ReportingStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A reporting store backed by a single SQLite file.
///
/// A run accesses the store strictly sequentially; the mutex exists only so
/// the connection can sit behind `&self` methods.
pub struct SqliteStore {
  pub(crate) conn: Mutex<Connection>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::init(Connection::open(path)?)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Mutex::new(conn) })
  }

  fn with_conn<T>(
    &self,
    f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
  ) -> Result<T> {
    let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(f(&conn)?)
  }
}

// ─── ReportingStore impl ─────────────────────────────────────────────────────

impl ReportingStore for SqliteStore {
  type Error = Error;

  fn truncate(&self, table: Table) -> Result<()> {
    // SQLite has no TRUNCATE; an unqualified DELETE is the equivalent.
    let cleared = self
      .with_conn(|conn| conn.execute(&format!("DELETE FROM {}", table.name()), []))?;
    tracing::debug!(table = table.name(), rows = cleared, "table cleared");
    Ok(())
  }

  fn last_created_at(&self, table: Table) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = self.with_conn(|conn| {
      conn
        .query_row(
          &format!(
            "SELECT created_at FROM {} ORDER BY created_at DESC LIMIT 1",
            table.name()
          ),
          [],
          |row| row.get(0),
        )
        .optional()
    })?;

    raw
      .map(|value| {
        DateTime::parse_from_rfc3339(&value)
          .map(|dt| dt.with_timezone(&Utc))
          .map_err(|source| Error::Timestamp { value, source })
      })
      .transpose()
  }

  fn insert_policy(&self, row: &PolicyRow) -> Result<()> {
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT INTO escalation_policies (id, name, num_loops)
           VALUES (?1, ?2, ?3)",
          params![row.id, row.name, row.num_loops],
        )
        .map(drop)
    })
  }

  fn insert_rule(&self, row: &RuleRow) -> Result<()> {
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT INTO escalation_rules
             (id, escalation_policy_id, escalation_delay_in_minutes, position_index)
           VALUES (?1, ?2, ?3, ?4)",
          params![row.id, row.policy_id, row.delay_minutes, row.position_index],
        )
        .map(drop)
    })
  }

  fn insert_rule_user(&self, row: &RuleUserRow) -> Result<()> {
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT INTO escalation_rule_users (id, escalation_rule_id, user_id)
           VALUES (?1, ?2, ?3)",
          params![row.id, row.rule_id, row.user_id],
        )
        .map(drop)
    })
  }

  fn insert_rule_schedule(&self, row: &RuleScheduleRow) -> Result<()> {
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT INTO escalation_rule_schedules (id, escalation_rule_id, schedule_id)
           VALUES (?1, ?2, ?3)",
          params![row.id, row.rule_id, row.schedule_id],
        )
        .map(drop)
    })
  }

  fn insert_user(&self, row: &UserRow) -> Result<()> {
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3)",
          params![row.id, row.name, row.email],
        )
        .map(drop)
    })
  }

  fn insert_service(&self, row: &ServiceRow) -> Result<()> {
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT INTO services (id, name, status, type) VALUES (?1, ?2, ?3, ?4)",
          params![row.id, row.name, row.status, row.kind],
        )
        .map(drop)
    })
  }

  fn insert_schedule(&self, row: &ScheduleRow) -> Result<()> {
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT INTO schedules (id, name) VALUES (?1, ?2)",
          params![row.id, row.name],
        )
        .map(drop)
    })
  }

  fn insert_user_schedule(&self, row: &UserScheduleRow) -> Result<()> {
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT INTO user_schedules (id, user_id, schedule_id)
           VALUES (?1, ?2, ?3)",
          params![row.id, row.user_id, row.schedule_id],
        )
        .map(drop)
    })
  }

  fn insert_incident(&self, row: &IncidentRow) -> Result<()> {
    // OR REPLACE: the overlap buffer legitimately re-delivers records near
    // the previous run's boundary.
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT OR REPLACE INTO incidents
             (id, incident_number, created_at, html_url, incident_key,
              service_id, escalation_policy_id,
              trigger_summary, trigger_self_url, trigger_type)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          params![
            row.id,
            row.number,
            row.created_at,
            row.html_url,
            row.incident_key,
            row.service_id,
            row.policy_id,
            row.trigger_summary,
            row.trigger_self_url,
            row.trigger_kind,
          ],
        )
        .map(drop)
    })
  }

  fn insert_log_entry(&self, row: &LogEntryRow) -> Result<()> {
    self.with_conn(|conn| {
      conn
        .execute(
          "INSERT OR REPLACE INTO log_entries
             (id, type, created_at, incident_id, agent_type, agent_id,
              channel_type, user_id, notification_type, assigned_user_id)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          params![
            row.id,
            row.kind,
            row.created_at,
            row.incident_id,
            row.agent_kind,
            row.agent_id,
            row.channel_kind,
            row.user_id,
            row.notification_kind,
            row.assigned_user_id,
          ],
        )
        .map(drop)
    })
  }
}
