//! Blocking HTTP client for the incident-management REST API.
//!
//! Implements [`RemoteSource`] for the sync tasks in `pulse-core`. Each
//! list endpoint is drained page by page — `limit`/`offset` advance until
//! the remote's `more` continuation flag clears — and the time-ranged
//! endpoints add `since`/`until` query parameters. There is no retry; a
//! transport or status failure is fatal to the run.

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, de::DeserializeOwned};

use pulse_core::{
  fetch::RemoteSource,
  model::{
    EscalationPolicy, EscalationRule, Incident, LogEntry, Schedule, Service,
    User,
  },
};

/// Connection settings for the remote API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url:  String,
  /// Static API token sent with every request.
  pub token:     String,
  /// Page size requested from list endpoints.
  pub page_size: u32,
}

/// Blocking client for the remote API.
///
/// Cheap to clone — the inner [`reqwest::blocking::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: reqwest::blocking::Client,
  config: ApiConfig,
}

// ─── Response envelopes ──────────────────────────────────────────────────────
// Every list response wraps its items under a resource-specific key and
// carries a `more` continuation flag.

#[derive(Deserialize)]
struct PolicyPage {
  escalation_policies: Vec<EscalationPolicy>,
  #[serde(default)]
  more:                bool,
}

#[derive(Deserialize)]
struct RulePage {
  escalation_rules: Vec<EscalationRule>,
}

#[derive(Deserialize)]
struct UserPage {
  users: Vec<User>,
  #[serde(default)]
  more:  bool,
}

#[derive(Deserialize)]
struct ServicePage {
  services: Vec<Service>,
  #[serde(default)]
  more:     bool,
}

#[derive(Deserialize)]
struct SchedulePage {
  schedules: Vec<Schedule>,
  #[serde(default)]
  more:      bool,
}

#[derive(Deserialize)]
struct IncidentPage {
  incidents: Vec<Incident>,
  #[serde(default)]
  more:      bool,
}

#[derive(Deserialize)]
struct LogEntryPage {
  log_entries: Vec<LogEntry>,
  #[serde(default)]
  more:        bool,
}

// ─── Client ──────────────────────────────────────────────────────────────────

fn stamp(at: DateTime<Utc>) -> String {
  at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = reqwest::blocking::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Fetch one page and deserialise it as `P`.
  fn get_page<P: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<P> {
    let response = self
      .client
      .get(self.url(path))
      .header("Authorization", format!("Token token={}", self.config.token))
      .query(query)
      .send()?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::Status { path: path.to_owned(), status });
    }
    Ok(response.json()?)
  }

  /// Drain a paged list endpoint; `split` pulls (items, more) out of each
  /// page envelope.
  fn drain<P, T>(
    &self,
    path: &str,
    extra: &[(&str, String)],
    split: impl Fn(P) -> (Vec<T>, bool),
  ) -> Result<Vec<T>>
  where
    P: DeserializeOwned,
  {
    let mut out = Vec::new();
    let mut offset: u32 = 0;

    loop {
      let mut query: Vec<(&str, String)> = vec![
        ("limit", self.config.page_size.to_string()),
        ("offset", offset.to_string()),
      ];
      query.extend_from_slice(extra);

      let page: P = self.get_page(path, &query)?;
      let (items, more) = split(page);
      tracing::debug!(path, offset, count = items.len(), more, "page fetched");
      out.extend(items);

      if !more {
        return Ok(out);
      }
      offset += self.config.page_size;
    }
  }
}

impl RemoteSource for ApiClient {
  type Error = Error;

  fn escalation_policies(&self) -> Result<Vec<EscalationPolicy>> {
    self.drain("/escalation_policies", &[], |page: PolicyPage| {
      (page.escalation_policies, page.more)
    })
  }

  fn escalation_rules(&self, policy_id: &str) -> Result<Vec<EscalationRule>> {
    // Rule lists are bounded by the policy's level count; the remote does
    // not paginate them.
    let page: RulePage = self.get_page(
      &format!("/escalation_policies/{policy_id}/escalation_rules"),
      &[],
    )?;
    Ok(page.escalation_rules)
  }

  fn users(&self) -> Result<Vec<User>> {
    self.drain("/users", &[], |page: UserPage| (page.users, page.more))
  }

  fn services(&self) -> Result<Vec<Service>> {
    self.drain("/services", &[], |page: ServicePage| {
      (page.services, page.more)
    })
  }

  fn schedules(&self) -> Result<Vec<Schedule>> {
    self.drain("/schedules", &[], |page: SchedulePage| {
      (page.schedules, page.more)
    })
  }

  fn incidents(
    &self,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
  ) -> Result<Vec<Incident>> {
    let range = [("since", stamp(since)), ("until", stamp(until))];
    self.drain("/incidents", &range, |page: IncidentPage| {
      (page.incidents, page.more)
    })
  }

  fn log_entries(
    &self,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
  ) -> Result<Vec<LogEntry>> {
    let range = [
      ("since", stamp(since)),
      ("until", stamp(until)),
      ("time_zone", "UTC".to_owned()),
    ];
    self.drain("/log_entries", &range, |page: LogEntryPage| {
      (page.log_entries, page.more)
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn policy_page_carries_continuation_flag() {
    let page: PolicyPage = serde_json::from_str(
      r#"{
        "escalation_policies": [
          {"id": "P1", "name": "Primary", "num_loops": 2}
        ],
        "limit": 25,
        "offset": 0,
        "more": true
      }"#,
    )
    .unwrap();

    assert_eq!(page.escalation_policies.len(), 1);
    assert_eq!(page.escalation_policies[0].num_loops, 2);
    assert!(page.more);
  }

  #[test]
  fn missing_more_flag_defaults_to_done() {
    let page: UserPage = serde_json::from_str(
      r#"{"users": [{"id": "U1", "name": "Alice", "email": "a@x"}]}"#,
    )
    .unwrap();
    assert!(!page.more);
  }

  #[test]
  fn incident_page_with_nested_references() {
    let page: IncidentPage = serde_json::from_str(
      r#"{
        "incidents": [{
          "id": "I1",
          "incident_number": 42,
          "created_at": "2024-06-01T12:00:00Z",
          "html_url": "https://example.test/i/I1",
          "incident_key": "db-down",
          "service": {"id": "SVC1", "type": "service_reference"},
          "escalation_policy": {"id": "P1", "type": "escalation_policy_reference"},
          "first_trigger_log_entry": {
            "id": "L1",
            "type": "trigger_log_entry",
            "summary": "DB down",
            "self": "https://api.example.test/log_entries/L1"
          }
        }],
        "more": false
      }"#,
    )
    .unwrap();

    let incident = &page.incidents[0];
    assert_eq!(incident.incident_number, 42);
    assert_eq!(incident.service.id, "SVC1");
    assert_eq!(incident.first_trigger_log_entry.summary, "DB down");
    assert_eq!(
      incident.first_trigger_log_entry.self_url,
      "https://api.example.test/log_entries/L1"
    );
  }

  #[test]
  fn log_entry_page_tolerates_absent_teams() {
    let page: LogEntryPage = serde_json::from_str(
      r#"{
        "log_entries": [{
          "id": "L1",
          "type": "notify_log_entry",
          "created_at": "2024-06-01T12:00:00Z",
          "incident": {"id": "I1"},
          "agent": {"id": "U1", "type": "user_reference"},
          "channel": {"type": "auto"}
        }],
        "more": false
      }"#,
    )
    .unwrap();

    assert!(page.log_entries[0].teams.is_empty());
    assert_eq!(page.log_entries[0].agent.kind, "user_reference");
  }

  #[test]
  fn stamp_is_rfc3339_utc() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(stamp(at), "2024-01-01T00:00:00Z");
  }
}
