//! `~/.netrc` lookup.

use std::fs;
use std::path::PathBuf;

use super::{Credential, CredentialError, CredentialsProvider};

/// Reads credentials from a `.netrc` file, `~/.netrc` unless told otherwise.
#[derive(Debug, Default)]
pub struct NetrcProvider {
  path: Option<PathBuf>,
}

impl NetrcProvider {
  pub fn new() -> Self {
    Self::default()
  }

  /// Read from `path` instead of `~/.netrc`.
  pub fn with_path(path: impl Into<PathBuf>) -> Self {
    Self { path: Some(path.into()) }
  }

  fn resolve_path(&self) -> Result<PathBuf, CredentialError> {
    match &self.path {
      Some(path) => Ok(path.clone()),
      None => std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".netrc"))
        .ok_or(CredentialError::NoHomeDirectory),
    }
  }
}

impl CredentialsProvider for NetrcProvider {
  /// A missing file is not an error, it simply has no entries.
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError> {
    let path = self.resolve_path()?;
    if !path.exists() {
      return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|source| CredentialError::Read { path, source })?;
    parse_netrc(&content, host)
  }
}

#[derive(Default)]
struct Entry {
  login: Option<String>,
  password: Option<String>,
}

impl Entry {
  fn into_credential(self) -> Option<Credential> {
    Some(Credential {
      username: self.login?,
      password: self.password?,
    })
  }
}

/// Find the entry for `host`, falling back to a `default` entry.
///
/// Works on the whitespace separated token stream, so entries may span lines
/// or share one. `macdef` bodies run until the next blank line and are
/// skipped. An entry without both `login` and `password` does not match.
fn parse_netrc(content: &str, host: &str) -> Result<Option<Credential>, CredentialError> {
  let mut tokens = tokenize(content).into_iter();
  let mut matched: Option<Entry> = None;
  let mut fallback: Option<Entry> = None;
  // Where the values of the entry being read should go, if anywhere.
  let mut current: Option<Entry> = None;
  let mut current_is_default = false;

  let mut finish = |entry: Option<Entry>, is_default: bool, matched: &mut Option<Entry>| {
    if let Some(entry) = entry {
      if is_default {
        fallback.get_or_insert(entry);
      } else {
        matched.get_or_insert(entry);
      }
    }
  };

  while let Some(token) = tokens.next() {
    match token.as_str() {
      "machine" => {
        finish(current.take(), current_is_default, &mut matched);
        let name = tokens
          .next()
          .ok_or_else(|| CredentialError::Parse("machine without a host name".to_string()))?;
        current = (name == host).then(Entry::default);
        current_is_default = false;
      }
      "default" => {
        finish(current.take(), current_is_default, &mut matched);
        current = Some(Entry::default());
        current_is_default = true;
      }
      "login" | "password" | "account" | "port" => {
        let value = tokens.next().ok_or_else(|| CredentialError::Parse(format!("{token} without a value")))?;
        if let Some(entry) = current.as_mut() {
          match token.as_str() {
            "login" => entry.login = Some(value),
            "password" => entry.password = Some(value),
            _ => {}
          }
        }
      }
      _ => {}
    }
  }
  finish(current.take(), current_is_default, &mut matched);

  let complete = matched.and_then(Entry::into_credential);
  Ok(complete.or_else(|| fallback.and_then(Entry::into_credential)))
}

/// Split into tokens, dropping comments and `macdef` bodies.
fn tokenize(content: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  let mut in_macro = false;

  for line in content.lines() {
    if in_macro {
      in_macro = !line.trim().is_empty();
      continue;
    }
    if line.trim_start().starts_with('#') {
      continue;
    }

    let mut words = line.split_whitespace();
    while let Some(word) = words.next() {
      if word == "macdef" {
        // The macro name is on this line, the body follows it.
        words.next();
        in_macro = true;
        break;
      }
      tokens.push(word.to_string());
    }
  }

  tokens
}
