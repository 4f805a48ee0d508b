//! Content labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::de;

/// Namespace of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPrefix {
  Global,
  My,
  System,
  Team,
}

impl LabelPrefix {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Global => "global",
      Self::My => "my",
      Self::System => "system",
      Self::Team => "team",
    }
  }
}

/// A label attached to content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
  #[serde(deserialize_with = "de::string_or_number")]
  pub id: String,
  pub name: String,
  pub prefix: LabelPrefix,
}

impl fmt::Display for Label {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}
