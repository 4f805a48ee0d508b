//! Content records: pages, blog posts, comments and attachments.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de;
use super::space::Space;
use super::user::User;

/// The kinds of content Confluence stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
  Page,
  BlogPost,
  Comment,
  Attachment,
}

impl ContentType {
  /// Wire representation used in paths and query parameters.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Page => "page",
      Self::BlogPost => "blogpost",
      Self::Comment => "comment",
      Self::Attachment => "attachment",
    }
  }
}

impl fmt::Display for ContentType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Lifecycle state of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
  Current,
  Draft,
  Historical,
  Trashed,
}

impl ContentStatus {
  /// Wire representation used in query parameters and bodies.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Current => "current",
      Self::Draft => "draft",
      Self::Historical => "historical",
      Self::Trashed => "trashed",
    }
  }
}

impl fmt::Display for ContentStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Which comments to return relative to the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentDepth {
  /// Only top-level comments (the server default).
  Root,
  /// Comments at every depth.
  All,
}

impl CommentDepth {
  /// Value of the `depth` query parameter; `None` leaves it unset.
  pub fn as_str(&self) -> Option<&'static str> {
    match self {
      Self::Root => None,
      Self::All => Some("all"),
    }
  }
}

/// Where a comment is attached on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentLocation {
  Inline,
  Footer,
  Resolved,
}

impl CommentLocation {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Inline => "inline",
      Self::Footer => "footer",
      Self::Resolved => "resolved",
    }
  }
}

/// Body representations understood by the content body converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
  Storage,
  Editor,
  View,
  ExportView,
  StyledView,
}

impl BodyFormat {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Storage => "storage",
      Self::Editor => "editor",
      Self::View => "view",
      Self::ExportView => "export_view",
      Self::StyledView => "styled_view",
    }
  }
}

/// Main record for every content type.
///
/// Only `id`, `title`, `status` and `type` are always returned. The remaining
/// fields are populated when the corresponding expansion was requested and
/// are `None` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
  /// Server-assigned identifier.
  #[serde(deserialize_with = "de::string_or_number")]
  pub id: String,
  pub title: String,
  pub status: ContentStatus,
  #[serde(rename = "type")]
  pub content_type: ContentType,
  /// Space the content lives in (`expand=space`).
  pub space: Option<Space>,
  /// Body in one or more representations (`expand=body.storage`, ...).
  pub body: Option<ContentBody>,
  /// Authoring history (`expand=history`).
  pub history: Option<ContentHistory>,
  /// Current version (`expand=version`).
  pub version: Option<Version>,
  /// Parent chain, root first (`expand=ancestors`).
  pub ancestors: Option<Vec<Content>>,
  pub metadata: Option<Map<String, Value>>,
  pub extensions: Option<Map<String, Value>>,
  #[serde(rename = "_links")]
  pub links: Option<ContentLinks>,
}

impl fmt::Display for Content {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.id, self.title)
  }
}

/// Hyperlinks returned alongside content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentLinks {
  /// Path to the content within the web UI.
  #[serde(rename = "webui")]
  pub web_ui: Option<String>,
  /// Download path, only present on attachments.
  pub download: Option<String>,
  #[serde(rename = "tinyui")]
  pub tiny_ui: Option<String>,
  /// Fully qualified API endpoint for the resource.
  #[serde(rename = "self")]
  pub self_link: Option<String>,
}

/// A single body rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRepresentation {
  pub value: String,
  /// Representation name such as `"storage"` or `"view"`.
  pub representation: String,
}

/// Body of a piece of content. Each representation is only present when it
/// was expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBody {
  pub storage: Option<BodyRepresentation>,
  pub editor: Option<BodyRepresentation>,
  pub view: Option<BodyRepresentation>,
  pub export_view: Option<BodyRepresentation>,
  pub styled_view: Option<BodyRepresentation>,
  pub anonymous_export_view: Option<BodyRepresentation>,
}

/// History of a piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentHistory {
  /// Whether this is the latest version.
  pub latest: bool,
  pub created_by: User,
  pub created_date: String,
  /// Only with `expand=history.lastUpdated`.
  pub last_updated: Option<ContentVersion>,
  pub previous_version: Option<ContentVersion>,
  pub next_version: Option<ContentVersion>,
  /// Left as raw JSON; the shape varies with the requested sub-expansions.
  pub contributors: Option<Value>,
}

/// A fully described version entry as found in content history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentVersion {
  pub by: User,
  pub when: String,
  pub message: String,
  pub number: u64,
  pub minor_edit: bool,
  pub hidden: bool,
}

impl fmt::Display for ContentVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.by, self.when)
  }
}

/// Version of a versioned object (content, property).
///
/// Numbers increase by exactly one per update; the server rejects anything
/// else with a 409.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
  pub number: u64,
  pub minor_edit: bool,
  pub hidden: Option<bool>,
  pub by: Option<User>,
  pub when: Option<String>,
  pub message: Option<String>,
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.number)
  }
}
