//! Key/value properties stored against content and spaces.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::{Content, Version};
use super::space::Space;

/// Arbitrary JSON stored under a key on a piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentProperty {
  /// Unique per content item.
  pub key: String,
  pub value: Value,
  pub version: Option<Version>,
  /// Owning content (`expand=content`).
  pub content: Option<Box<Content>>,
}

impl fmt::Display for ContentProperty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.key)
  }
}

/// Arbitrary JSON stored under a key on a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceProperty {
  /// Unique per space.
  pub key: String,
  pub value: Value,
  pub version: Option<Version>,
  /// Owning space (`expand=space`).
  pub space: Option<Box<Space>>,
}

impl fmt::Display for SpaceProperty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.key)
  }
}
