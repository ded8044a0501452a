//! Explicit projections from wire entities to persisted rows.
//!
//! Every persisted column is assigned from a named source field here;
//! nothing is copied structurally. Optional nested associations absent from
//! the payload become empty strings so rows keep their full column set.

use crate::{
  model::{
    EscalationPolicy, EscalationRule, Incident, LogEntry, Schedule, Service,
    User,
  },
  row::{
    IncidentRow, LogEntryRow, PolicyRow, RuleRow, ScheduleRow, ServiceRow,
    UserRow,
  },
};

pub fn map_policy(policy: &EscalationPolicy) -> PolicyRow {
  PolicyRow {
    id:        policy.id.clone(),
    name:      policy.name.clone(),
    num_loops: policy.num_loops,
  }
}

/// Map one policy's rules, injecting the two fields the wire object lacks:
/// the owning policy id, and the rule's 0-based position within the
/// policy's list (assigned from fetch order — the remote does not expose
/// ordering explicitly).
pub fn map_rules(policy_id: &str, rules: &[EscalationRule]) -> Vec<RuleRow> {
  rules
    .iter()
    .enumerate()
    .map(|(index, rule)| RuleRow {
      id:             rule.id.clone(),
      policy_id:      policy_id.to_owned(),
      delay_minutes:  rule.delay_minutes,
      position_index: index as u32,
    })
    .collect()
}

pub fn map_user(user: &User) -> UserRow {
  UserRow {
    id:    user.id.clone(),
    name:  user.name.clone(),
    email: user.email.clone(),
  }
}

pub fn map_service(service: &Service) -> ServiceRow {
  ServiceRow {
    id:     service.id.clone(),
    name:   service.name.clone(),
    status: service.status.clone(),
    kind:   service.kind.clone(),
  }
}

pub fn map_schedule(schedule: &Schedule) -> ScheduleRow {
  ScheduleRow {
    id:   schedule.id.clone(),
    name: schedule.name.clone(),
  }
}

pub fn map_incident(incident: &Incident) -> IncidentRow {
  IncidentRow {
    id:               incident.id.clone(),
    number:           incident.incident_number,
    created_at:       incident.created_at.clone(),
    html_url:         incident.html_url.clone(),
    incident_key:     incident.incident_key.clone(),
    service_id:       incident.service.id.clone(),
    policy_id:        incident.escalation_policy.id.clone(),
    trigger_summary:  incident.first_trigger_log_entry.summary.clone(),
    trigger_self_url: incident.first_trigger_log_entry.self_url.clone(),
    trigger_kind:     incident.first_trigger_log_entry.kind.clone(),
  }
}

/// A log entry may arrive with no team attached; both team-derived columns
/// are then persisted as empty strings. When a team is present, its id
/// fills both columns.
pub fn map_log_entry(entry: &LogEntry) -> LogEntryRow {
  let team_id = entry
    .teams
    .first()
    .map(|team| team.id.clone())
    .unwrap_or_default();

  LogEntryRow {
    id:                entry.id.clone(),
    kind:              entry.kind.clone(),
    created_at:        entry.created_at.clone(),
    incident_id:       entry.incident.id.clone(),
    agent_kind:        entry.agent.kind.clone(),
    agent_id:          entry.agent.id.clone(),
    channel_kind:      entry.channel.kind.clone(),
    user_id:           team_id.clone(),
    notification_kind: entry.kind.clone(),
    assigned_user_id:  team_id,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::ObjectRef;

  #[test]
  fn rules_get_policy_id_and_position_injected() {
    let rules = vec![
      EscalationRule { id: "R1".into(), delay_minutes: 5, targets: vec![] },
      EscalationRule { id: "R2".into(), delay_minutes: 30, targets: vec![] },
    ];

    let rows = map_rules("P1", &rules);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].policy_id, "P1");
    assert_eq!(rows[0].position_index, 0);
    assert_eq!(rows[1].position_index, 1);
    assert_eq!(rows[1].delay_minutes, 30);
  }

  #[test]
  fn incident_trigger_columns_come_from_first_trigger_log_entry() {
    let incident = Incident {
      id:                      "I1".into(),
      incident_number:         42,
      created_at:              "2024-06-01T12:00:00Z".into(),
      html_url:                "https://example.test/incidents/I1".into(),
      incident_key:            "srv-down".into(),
      service:                 ObjectRef { id: "SVC1".into(), ..Default::default() },
      escalation_policy:       ObjectRef { id: "P1".into(), ..Default::default() },
      first_trigger_log_entry: ObjectRef {
        id:       "L1".into(),
        kind:     "trigger_log_entry".into(),
        summary:  "CPU on fire".into(),
        self_url: "https://api.example.test/log_entries/L1".into(),
        html_url: String::new(),
      },
    };

    let row = map_incident(&incident);

    assert_eq!(row.number, 42);
    assert_eq!(row.service_id, "SVC1");
    assert_eq!(row.policy_id, "P1");
    assert_eq!(row.trigger_summary, "CPU on fire");
    assert_eq!(row.trigger_kind, "trigger_log_entry");
  }

  #[test]
  fn log_entry_with_no_team_gets_empty_placeholders() {
    let entry = LogEntry {
      id:         "L1".into(),
      kind:       "notify_log_entry".into(),
      created_at: "2024-06-01T12:00:00Z".into(),
      incident:   ObjectRef { id: "I1".into(), ..Default::default() },
      agent:      ObjectRef {
        id: "U9".into(),
        kind: "user_reference".into(),
        ..Default::default()
      },
      channel:    ObjectRef { kind: "auto".into(), ..Default::default() },
      teams:      vec![],
    };

    let row = map_log_entry(&entry);

    assert_eq!(row.user_id, "");
    assert_eq!(row.assigned_user_id, "");
    assert_eq!(row.incident_id, "I1");
    assert_eq!(row.agent_id, "U9");
    assert_eq!(row.agent_kind, "user_reference");
    assert_eq!(row.channel_kind, "auto");
    assert_eq!(row.notification_kind, "notify_log_entry");
  }

  #[test]
  fn log_entry_first_team_fills_both_columns() {
    let entry = LogEntry {
      id:         "L2".into(),
      kind:       "assign_log_entry".into(),
      created_at: "2024-06-01T13:00:00Z".into(),
      incident:   ObjectRef::default(),
      agent:      ObjectRef::default(),
      channel:    ObjectRef::default(),
      teams:      vec![
        ObjectRef { id: "T1".into(), ..Default::default() },
        ObjectRef { id: "T2".into(), ..Default::default() },
      ],
    };

    let row = map_log_entry(&entry);

    assert_eq!(row.user_id, "T1");
    assert_eq!(row.assigned_user_id, "T1");
  }
}
