//! The paged-fetch collaborator contract.

use chrono::{DateTime, Utc};

use crate::model::{
  EscalationPolicy, EscalationRule, Incident, LogEntry, Schedule, Service,
  User,
};

/// Abstraction over the remote incident-management API.
///
/// Implementations own pagination: each list method keeps requesting pages
/// until the remote's continuation flag clears and returns the concatenated
/// result in remote order. Calls block; there is no retry — a remote
/// failure surfaces as `Err` and is fatal to the run.
pub trait RemoteSource {
  type Error: std::error::Error + Send + Sync + 'static;

  fn escalation_policies(&self) -> Result<Vec<EscalationPolicy>, Self::Error>;

  /// Rules for one policy, in the remote's level order.
  fn escalation_rules(
    &self,
    policy_id: &str,
  ) -> Result<Vec<EscalationRule>, Self::Error>;

  fn users(&self) -> Result<Vec<User>, Self::Error>;

  fn services(&self) -> Result<Vec<Service>, Self::Error>;

  fn schedules(&self) -> Result<Vec<Schedule>, Self::Error>;

  /// Incidents created in `[since, until)`.
  fn incidents(
    &self,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
  ) -> Result<Vec<Incident>, Self::Error>;

  /// Log entries created in `[since, until)`.
  fn log_entries(
    &self,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
  ) -> Result<Vec<LogEntry>, Self::Error>;
}
