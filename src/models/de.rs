//! Serde helpers for the quirks of Confluence's JSON.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
  String(String),
  Number(serde_json::Number),
}

/// Accept an identifier sent either as a JSON string or a JSON number.
///
/// Confluence is inconsistent here: content ids are usually strings, but
/// some endpoints (and older servers) emit bare numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match StringOrNumber::deserialize(deserializer)? {
    StringOrNumber::String(value) => value,
    StringOrNumber::Number(value) => value.to_string(),
  })
}

/// Comma separated string <-> list of trimmed, non-empty entries.
pub(crate) mod comma_list {
  use super::*;

  pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = String::deserialize(deserializer)?;
    Ok(
      raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect(),
    )
  }

  pub(crate) fn serialize<S>(values: &[String], serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&values.join(","))
  }
}
