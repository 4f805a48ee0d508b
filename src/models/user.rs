//! Users, groups and profile icons.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user or space icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
  pub path: String,
  pub width: u32,
  pub height: u32,
  #[serde(rename = "isDefault", alias = "is_default")]
  pub is_default: bool,
}

impl fmt::Display for Icon {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} [{}x{}]", self.path, self.width, self.height)
  }
}

/// A Confluence user, either requested directly or embedded in another
/// record.
///
/// Every field is optional: embedded users (anonymous authors in particular)
/// frequently omit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  /// Login name; `None` for the anonymous user.
  pub username: Option<String>,
  pub display_name: Option<String>,
  pub user_key: Option<String>,
  /// `known`, `anonymous`, `unknown`, ...
  #[serde(rename = "type")]
  pub user_type: Option<String>,
  pub profile_picture: Option<Icon>,
}

impl fmt::Display for User {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.username {
      Some(username) => f.write_str(username),
      None => f.write_str("anonymous"),
    }
  }
}

/// A group of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
  #[serde(rename = "type")]
  pub group_type: String,
  pub name: String,
}

impl fmt::Display for Group {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}
