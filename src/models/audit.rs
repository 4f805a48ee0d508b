//! Audit log records. These are read-only.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::user::User;

/// Object an audit record refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedObject {
  pub name: String,
  pub object_type: String,
}

impl fmt::Display for AffectedObject {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

/// A single before/after value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedValue {
  pub name: String,
  pub new_value: String,
  pub old_value: String,
}

impl fmt::Display for ChangedValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} change from {} to {}", self.name, self.old_value, self.new_value)
  }
}

/// A single audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
  pub affected_object: AffectedObject,
  pub associated_objects: Vec<AffectedObject>,
  pub author: User,
  pub category: String,
  pub changed_values: Vec<ChangedValue>,
  /// Sent as milliseconds since the epoch.
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub creation_date: DateTime<Utc>,
  pub description: String,
  /// Sent as one comma separated string.
  #[serde(rename = "remoteAddress", with = "de::comma_list")]
  pub remote_addresses: Vec<String>,
  pub summary: String,
  #[serde(rename = "sysAdmin")]
  pub is_sys_admin: bool,
}

impl fmt::Display for AuditRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.summary)
  }
}
