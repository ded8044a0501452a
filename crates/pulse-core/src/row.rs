//! Flat row shapes handed to the reporting store.
//!
//! Every row carries its full column set; optional associations that were
//! absent on the wire are empty strings, never omissions.

/// Tables in the reporting store. `name()` is the SQL identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
  EscalationPolicies,
  EscalationRules,
  EscalationRuleUsers,
  EscalationRuleSchedules,
  Users,
  Services,
  Schedules,
  UserSchedules,
  Incidents,
  LogEntries,
}

impl Table {
  pub fn name(self) -> &'static str {
    match self {
      Self::EscalationPolicies      => "escalation_policies",
      Self::EscalationRules         => "escalation_rules",
      Self::EscalationRuleUsers     => "escalation_rule_users",
      Self::EscalationRuleSchedules => "escalation_rule_schedules",
      Self::Users                   => "users",
      Self::Services                => "services",
      Self::Schedules               => "schedules",
      Self::UserSchedules           => "user_schedules",
      Self::Incidents               => "incidents",
      Self::LogEntries              => "log_entries",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRow {
  pub id:        String,
  pub name:      String,
  pub num_loops: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRow {
  pub id:             String,
  pub policy_id:      String,
  pub delay_minutes:  u32,
  /// 0-based rank of the rule within its policy, assigned in fetch order.
  pub position_index: u32,
}

/// rule↔user join row. `id` = rule_id + user_id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleUserRow {
  pub id:      String,
  pub rule_id: String,
  pub user_id: String,
}

/// rule↔schedule join row. `id` = rule_id + schedule_id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleScheduleRow {
  pub id:          String,
  pub rule_id:     String,
  pub schedule_id: String,
}

/// schedule↔user join row. `id` = user_id + schedule_id — note the field
/// order is reversed relative to the rule associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScheduleRow {
  pub id:          String,
  pub user_id:     String,
  pub schedule_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
  pub id:    String,
  pub name:  String,
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRow {
  pub id:     String,
  pub name:   String,
  pub status: String,
  pub kind:   String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
  pub id:   String,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRow {
  pub id:               String,
  pub number:           u64,
  pub created_at:       String,
  pub html_url:         String,
  pub incident_key:     String,
  pub service_id:       String,
  pub policy_id:        String,
  pub trigger_summary:  String,
  pub trigger_self_url: String,
  pub trigger_kind:     String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntryRow {
  pub id:                String,
  pub kind:              String,
  pub created_at:        String,
  pub incident_id:       String,
  pub agent_kind:        String,
  pub agent_id:          String,
  pub channel_kind:      String,
  pub user_id:           String,
  pub notification_kind: String,
  pub assigned_user_id:  String,
}
