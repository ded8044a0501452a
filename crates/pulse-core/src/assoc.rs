//! Association extraction — join-table rows reconstructed from nested API
//! payloads.
//!
//! Three association kinds exist: rule↔user and rule↔schedule (extracted
//! from escalation-rule targets) and schedule↔user (flattened from a
//! schedule's assigned-user list). Each row's composite id is built by
//! [`compose_id`] from the two foreign keys, in the order fixed per kind.

use crate::{
  model::{EscalationRule, Schedule},
  row::{RuleScheduleRow, RuleUserRow, UserScheduleRow},
};

/// Kind-tag marking an escalation target as a user.
pub const USER_REFERENCE: &str = "user_reference";
/// Kind-tag marking an escalation target as a schedule.
pub const SCHEDULE_REFERENCE: &str = "schedule_reference";

/// Composite identifier for an association row: exact byte concatenation,
/// left then right, no separator. This is the row's uniqueness key in the
/// store, so the argument order per association kind must never vary.
pub fn compose_id(left: &str, right: &str) -> String {
  format!("{left}{right}")
}

/// Join rows extracted from one batch of escalation rules.
#[derive(Debug, Default)]
pub struct RuleAssociations {
  pub users:     Vec<RuleUserRow>,
  pub schedules: Vec<RuleScheduleRow>,
  /// Targets whose kind-tag matched neither reference kind. They are
  /// dropped, but counted so callers can surface the drop.
  pub unmatched: usize,
}

/// Partition every rule's targets into user and schedule references.
///
/// Targets with an unrecognised kind-tag yield no row — the remote may
/// introduce reference kinds not modeled here, and the classifier stays
/// forward-tolerant. Output order follows input rule order, then target
/// order within each rule.
pub fn classify_targets(rules: &[EscalationRule]) -> RuleAssociations {
  let mut out = RuleAssociations::default();

  for rule in rules {
    for target in &rule.targets {
      match target.kind.as_str() {
        USER_REFERENCE => out.users.push(RuleUserRow {
          id:      compose_id(&rule.id, &target.id),
          rule_id: rule.id.clone(),
          user_id: target.id.clone(),
        }),
        SCHEDULE_REFERENCE => out.schedules.push(RuleScheduleRow {
          id:          compose_id(&rule.id, &target.id),
          rule_id:     rule.id.clone(),
          schedule_id: target.id.clone(),
        }),
        _ => out.unmatched += 1,
      }
    }
  }

  out
}

/// One join row per (schedule, assigned user), in source order. Duplicate
/// assignments pass through as separate rows.
///
/// The composite id for this kind is user_id + schedule_id — the reverse
/// of the rule associations.
pub fn flatten_schedule_users(schedules: &[Schedule]) -> Vec<UserScheduleRow> {
  let mut rows = Vec::new();

  for schedule in schedules {
    for user in &schedule.users {
      rows.push(UserScheduleRow {
        id:          compose_id(&user.id, &schedule.id),
        user_id:     user.id.clone(),
        schedule_id: schedule.id.clone(),
      });
    }
  }

  rows
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::ObjectRef;

  fn target(id: &str, kind: &str) -> ObjectRef {
    ObjectRef {
      id: id.into(),
      kind: kind.into(),
      ..ObjectRef::default()
    }
  }

  fn rule(id: &str, targets: Vec<ObjectRef>) -> EscalationRule {
    EscalationRule {
      id: id.into(),
      delay_minutes: 0,
      targets,
    }
  }

  #[test]
  fn compose_is_order_sensitive() {
    assert_eq!(compose_id("R1", "U1"), "R1U1");
    assert_ne!(compose_id("R1", "U1"), compose_id("U1", "R1"));
  }

  #[test]
  fn user_target_yields_one_rule_user_row() {
    let rules = vec![rule("R1", vec![target("U1", USER_REFERENCE)])];
    let out = classify_targets(&rules);

    assert_eq!(out.users.len(), 1);
    assert_eq!(out.users[0].id, "R1U1");
    assert_eq!(out.users[0].rule_id, "R1");
    assert_eq!(out.users[0].user_id, "U1");
    assert!(out.schedules.is_empty());
    assert_eq!(out.unmatched, 0);
  }

  #[test]
  fn schedule_target_yields_one_rule_schedule_row() {
    let rules = vec![rule("R1", vec![target("S1", SCHEDULE_REFERENCE)])];
    let out = classify_targets(&rules);

    assert_eq!(out.schedules.len(), 1);
    assert_eq!(out.schedules[0].id, "R1S1");
    assert_eq!(out.schedules[0].rule_id, "R1");
    assert_eq!(out.schedules[0].schedule_id, "S1");
    assert!(out.users.is_empty());
  }

  #[test]
  fn unknown_kind_tag_yields_no_row_but_is_counted() {
    let rules = vec![rule("R1", vec![
      target("U1", USER_REFERENCE),
      target("X1", "team_reference"),
      target("S1", SCHEDULE_REFERENCE),
    ])];
    let out = classify_targets(&rules);

    assert_eq!(out.users.len(), 1);
    assert_eq!(out.schedules.len(), 1);
    assert_eq!(out.unmatched, 1);
  }

  #[test]
  fn output_preserves_rule_then_target_order() {
    let rules = vec![
      rule("R1", vec![target("U2", USER_REFERENCE), target("U1", USER_REFERENCE)]),
      rule("R2", vec![target("U3", USER_REFERENCE)]),
    ];
    let out = classify_targets(&rules);

    let ids: Vec<_> = out.users.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["R1U2", "R1U1", "R2U3"]);
  }

  #[test]
  fn flatten_uses_user_then_schedule_id_order() {
    let schedules = vec![Schedule {
      id:    "S1".into(),
      name:  "Primary".into(),
      users: vec![target("U1", USER_REFERENCE)],
    }];
    let rows = flatten_schedule_users(&schedules);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "U1S1");
    assert_eq!(rows[0].user_id, "U1");
    assert_eq!(rows[0].schedule_id, "S1");
  }

  #[test]
  fn flatten_preserves_duplicates_as_separate_rows() {
    let schedules = vec![Schedule {
      id:    "S1".into(),
      name:  "Primary".into(),
      users: vec![target("U1", USER_REFERENCE), target("U1", USER_REFERENCE)],
    }];
    let rows = flatten_schedule_users(&schedules);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], rows[1]);
  }
}
