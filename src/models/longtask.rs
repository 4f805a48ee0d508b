//! Status of server-side asynchronous jobs (space exports, deletions, ...).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Translation key naming the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskName {
  pub key: String,
  pub args: Vec<Value>,
}

/// Progress message emitted by the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMessage {
  pub translation: String,
  pub args: Vec<Value>,
}

/// Snapshot of a long running task. Poll again for fresh progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongTask {
  pub id: String,
  pub name: TaskName,
  /// Milliseconds since the task started.
  pub elapsed_time: u64,
  pub percentage_complete: u32,
  pub successful: bool,
  pub messages: Vec<TaskMessage>,
}

impl LongTask {
  /// Whether the task has reached 100%.
  pub fn is_complete(&self) -> bool {
    self.percentage_complete >= 100
  }
}

/// Handle to a task the server started in the background, returned with
/// `202 Accepted`. Poll it with `get_long_task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTaskRef {
  pub id: String,
  #[serde(alias = "_links", default)]
  pub links: LongTaskLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongTaskLinks {
  /// Path of the task's status resource, e.g. `/rest/api/longtask/{id}`.
  pub status: Option<String>,
}

impl fmt::Display for LongTask {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name.key)
  }
}
