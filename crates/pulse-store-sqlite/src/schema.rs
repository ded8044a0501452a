//! SQL schema for the reporting store.
//!
//! Executed once at connection startup.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS escalation_policies (
    id        TEXT PRIMARY KEY,
    name      TEXT NOT NULL,
    num_loops INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS escalation_rules (
    id                          TEXT PRIMARY KEY,
    escalation_policy_id        TEXT NOT NULL,
    escalation_delay_in_minutes INTEGER NOT NULL,
    position_index              INTEGER NOT NULL   -- 0-based rank within the policy
);

-- Join tables. id is the composite of the two foreign keys, concatenated
-- in the order they appear below.
CREATE TABLE IF NOT EXISTS escalation_rule_users (
    id                 TEXT PRIMARY KEY,
    escalation_rule_id TEXT NOT NULL,
    user_id            TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS escalation_rule_schedules (
    id                 TEXT PRIMARY KEY,
    escalation_rule_id TEXT NOT NULL,
    schedule_id        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL,
    email TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS services (
    id     TEXT PRIMARY KEY,
    name   TEXT NOT NULL,
    status TEXT NOT NULL,
    type   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS schedules (
    id   TEXT PRIMARY KEY,
    name TEXT NOT NULL
);

-- id is user_id + schedule_id, reversed relative to the rule join tables.
CREATE TABLE IF NOT EXISTS user_schedules (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    schedule_id TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS incidents (
    id                   TEXT PRIMARY KEY,
    incident_number      INTEGER NOT NULL,
    created_at           TEXT NOT NULL,   -- RFC 3339, as delivered
    html_url             TEXT NOT NULL,
    incident_key         TEXT NOT NULL,
    service_id           TEXT NOT NULL,
    escalation_policy_id TEXT NOT NULL,
    trigger_summary      TEXT NOT NULL,
    trigger_self_url     TEXT NOT NULL,
    trigger_type         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS log_entries (
    id                TEXT PRIMARY KEY,
    type              TEXT NOT NULL,
    created_at        TEXT NOT NULL,      -- RFC 3339, as delivered
    incident_id       TEXT NOT NULL,
    agent_type        TEXT NOT NULL,
    agent_id          TEXT NOT NULL,
    channel_type      TEXT NOT NULL,
    user_id           TEXT NOT NULL,      -- empty string when no team attached
    notification_type TEXT NOT NULL,
    assigned_user_id  TEXT NOT NULL       -- empty string when no team attached
);

CREATE INDEX IF NOT EXISTS incidents_created_idx   ON incidents(created_at);
CREATE INDEX IF NOT EXISTS log_entries_created_idx ON log_entries(created_at);
";
