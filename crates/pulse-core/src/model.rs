//! Wire-shape entities as returned by the incident-management API.
//!
//! Only the fields the reporting store persists are modeled; anything else
//! in the payload is ignored at deserialisation time. Entities are
//! immutable once fetched and live only for the duration of one run.

use serde::Deserialize;

/// A reference to another API object, as embedded in list payloads.
///
/// `kind` is the polymorphic discriminator (e.g. `"user_reference"`,
/// `"schedule_reference"`). Identity is the `id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectRef {
  #[serde(default)]
  pub id:       String,
  #[serde(rename = "type", default)]
  pub kind:     String,
  #[serde(default)]
  pub summary:  String,
  #[serde(rename = "self", default)]
  pub self_url: String,
  #[serde(default)]
  pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EscalationPolicy {
  pub id:        String,
  pub name:      String,
  #[serde(default)]
  pub num_loops: u32,
}

/// One level of an escalation policy.
///
/// The owning policy id and the rule's position within the policy are not
/// on the wire; the mapper injects both (see [`crate::map::map_rules`]).
#[derive(Debug, Clone, Deserialize)]
pub struct EscalationRule {
  pub id:            String,
  #[serde(rename = "escalation_delay_in_minutes", default)]
  pub delay_minutes: u32,
  /// Heterogeneous escalation targets, discriminated by `kind`.
  #[serde(default)]
  pub targets:       Vec<ObjectRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
  pub id:    String,
  pub name:  String,
  #[serde(default)]
  pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
  pub id:     String,
  pub name:   String,
  #[serde(default)]
  pub status: String,
  #[serde(rename = "type", default)]
  pub kind:   String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Schedule {
  pub id:    String,
  pub name:  String,
  /// Users assigned to the schedule, in rotation order. Duplicates are the
  /// remote's responsibility and pass through unchanged.
  #[serde(default)]
  pub users: Vec<ObjectRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Incident {
  pub id:                      String,
  #[serde(default)]
  pub incident_number:         u64,
  #[serde(default)]
  pub created_at:              String,
  #[serde(default)]
  pub html_url:                String,
  #[serde(default)]
  pub incident_key:            String,
  #[serde(default)]
  pub service:                 ObjectRef,
  #[serde(default)]
  pub escalation_policy:       ObjectRef,
  #[serde(default)]
  pub first_trigger_log_entry: ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
  pub id:         String,
  #[serde(rename = "type", default)]
  pub kind:       String,
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub incident:   ObjectRef,
  #[serde(default)]
  pub agent:      ObjectRef,
  #[serde(default)]
  pub channel:    ObjectRef,
  /// May be empty; the mapper substitutes placeholder columns.
  #[serde(default)]
  pub teams:      Vec<ObjectRef>,
}
