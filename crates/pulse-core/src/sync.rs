//! Per-entity sync tasks and the full transfer sequence.
//!
//! Each task fetches one entity kind, maps it, and hands every row to the
//! store, strictly sequentially. Full-refresh tables are fetched first and
//! truncated just before repopulation; truncate-then-insert is the
//! idempotency mechanism, so a failure between the two leaves the table
//! empty until the next successful run. The time-ordered kinds (incidents,
//! log entries) sync incrementally through the window walker instead.

use tracing::{info, warn};

use crate::{
  assoc,
  config::SyncConfig,
  error::{Error, Result},
  fetch::RemoteSource,
  map,
  row::Table,
  store::ReportingStore,
  window::{self, Clock},
};

pub fn sync_policies<S, R>(source: &S, store: &R) -> Result<()>
where
  S: RemoteSource,
  R: ReportingStore,
{
  let policies = source.escalation_policies().map_err(Error::fetch)?;

  store.truncate(Table::EscalationPolicies).map_err(Error::sink)?;
  for policy in &policies {
    store
      .insert_policy(&map::map_policy(policy))
      .map_err(Error::sink)?;
  }

  info!(count = policies.len(), "escalation policies refreshed");
  Ok(())
}

pub fn sync_users<S, R>(source: &S, store: &R) -> Result<()>
where
  S: RemoteSource,
  R: ReportingStore,
{
  let users = source.users().map_err(Error::fetch)?;

  store.truncate(Table::Users).map_err(Error::sink)?;
  for user in &users {
    store.insert_user(&map::map_user(user)).map_err(Error::sink)?;
  }

  info!(count = users.len(), "users refreshed");
  Ok(())
}

pub fn sync_services<S, R>(source: &S, store: &R) -> Result<()>
where
  S: RemoteSource,
  R: ReportingStore,
{
  let services = source.services().map_err(Error::fetch)?;

  store.truncate(Table::Services).map_err(Error::sink)?;
  for service in &services {
    store
      .insert_service(&map::map_service(service))
      .map_err(Error::sink)?;
  }

  info!(count = services.len(), "services refreshed");
  Ok(())
}

/// Refresh schedules and the schedule↔user join table together: both are
/// derived from the same fetched payload.
pub fn sync_schedules<S, R>(source: &S, store: &R) -> Result<()>
where
  S: RemoteSource,
  R: ReportingStore,
{
  let schedules = source.schedules().map_err(Error::fetch)?;

  store.truncate(Table::Schedules).map_err(Error::sink)?;
  store.truncate(Table::UserSchedules).map_err(Error::sink)?;

  for schedule in &schedules {
    store
      .insert_schedule(&map::map_schedule(schedule))
      .map_err(Error::sink)?;
  }

  let assignments = assoc::flatten_schedule_users(&schedules);
  for row in &assignments {
    store.insert_user_schedule(row).map_err(Error::sink)?;
  }

  info!(
    schedules = schedules.len(),
    assignments = assignments.len(),
    "schedules refreshed"
  );
  Ok(())
}

/// Refresh escalation rules and both rule association tables.
///
/// Rules are fetched per policy; the mapper injects the owning policy id
/// and the rule's position within the policy. The classifier then extracts
/// rule↔user and rule↔schedule rows from every fetched rule's targets.
pub fn sync_rules<S, R>(source: &S, store: &R) -> Result<()>
where
  S: RemoteSource,
  R: ReportingStore,
{
  let policies = source.escalation_policies().map_err(Error::fetch)?;

  let mut all_rules = Vec::new();
  let mut rule_rows = Vec::new();
  for policy in &policies {
    let rules = source.escalation_rules(&policy.id).map_err(Error::fetch)?;
    rule_rows.extend(map::map_rules(&policy.id, &rules));
    all_rules.extend(rules);
  }

  store.truncate(Table::EscalationRules).map_err(Error::sink)?;
  store.truncate(Table::EscalationRuleUsers).map_err(Error::sink)?;
  store
    .truncate(Table::EscalationRuleSchedules)
    .map_err(Error::sink)?;

  for row in &rule_rows {
    store.insert_rule(row).map_err(Error::sink)?;
  }

  let associations = assoc::classify_targets(&all_rules);
  for row in &associations.users {
    store.insert_rule_user(row).map_err(Error::sink)?;
  }
  for row in &associations.schedules {
    store.insert_rule_schedule(row).map_err(Error::sink)?;
  }

  if associations.unmatched > 0 {
    warn!(
      count = associations.unmatched,
      "dropped escalation targets with unrecognised kind-tag"
    );
  }
  info!(
    rules = rule_rows.len(),
    user_links = associations.users.len(),
    schedule_links = associations.schedules.len(),
    "escalation rules refreshed"
  );
  Ok(())
}

pub fn sync_incidents<S, R, C>(
  source: &S,
  store: &R,
  clock: &C,
  cfg: &SyncConfig,
) -> Result<()>
where
  S: RemoteSource,
  R: ReportingStore,
  C: Clock,
{
  let last = store.last_created_at(Table::Incidents).map_err(Error::sink)?;
  let start = window::resume_point(last, cfg.fallback_epoch, cfg.overlap());

  window::walk(clock, start, cfg.window(), |from, to| {
    info!(%from, %to, "incident window");
    let incidents = source.incidents(from, to).map_err(Error::fetch)?;
    for incident in &incidents {
      store
        .insert_incident(&map::map_incident(incident))
        .map_err(Error::sink)?;
    }
    Ok(())
  })
}

pub fn sync_log_entries<S, R, C>(
  source: &S,
  store: &R,
  clock: &C,
  cfg: &SyncConfig,
) -> Result<()>
where
  S: RemoteSource,
  R: ReportingStore,
  C: Clock,
{
  let last = store.last_created_at(Table::LogEntries).map_err(Error::sink)?;
  let start = window::resume_point(last, cfg.fallback_epoch, cfg.overlap());

  window::walk(clock, start, cfg.window(), |from, to| {
    info!(%from, %to, "log entry window");
    let entries = source.log_entries(from, to).map_err(Error::fetch)?;
    for entry in &entries {
      store
        .insert_log_entry(&map::map_log_entry(entry))
        .map_err(Error::sink)?;
    }
    Ok(())
  })
}

/// The full transfer sequence, one entity kind at a time. Stops at the
/// first fatal error.
pub fn run_all<S, R, C>(
  source: &S,
  store: &R,
  clock: &C,
  cfg: &SyncConfig,
) -> Result<()>
where
  S: RemoteSource,
  R: ReportingStore,
  C: Clock,
{
  sync_policies(source, store)?;
  sync_users(source, store)?;
  sync_schedules(source, store)?;
  sync_services(source, store)?;
  sync_rules(source, store)?;
  sync_log_entries(source, store, clock, cfg)?;
  sync_incidents(source, store, clock, cfg)?;
  Ok(())
}
