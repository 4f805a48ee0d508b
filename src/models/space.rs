//! Space records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::Content;
use super::user::Icon;

/// Space classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
  Global,
  Personal,
}

impl SpaceType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Global => "global",
      Self::Personal => "personal",
    }
  }
}

/// Space lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceStatus {
  Current,
  Archived,
}

impl SpaceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Current => "current",
      Self::Archived => "archived",
    }
  }
}

/// A top-level container of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
  pub id: i64,
  /// Stable external identifier used in every space path.
  pub key: String,
  pub name: String,
  #[serde(rename = "type")]
  pub space_type: SpaceType,
  pub status: Option<SpaceStatus>,
  /// Raw description (`expand=description.plain` and friends).
  pub description: Option<Value>,
  /// Home page (`expand=homepage`).
  pub homepage: Option<Box<Content>>,
  pub icon: Option<Icon>,
  pub metadata: Option<Map<String, Value>>,
}

impl fmt::Display for Space {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {} | {}", self.id, self.key, self.name)
  }
}
