//! Credential values and lookup failures.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Username and password (or personal access token) for Basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
  pub username: String,
  pub password: String,
}

impl Credential {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
    }
  }
}

impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credential")
      .field("username", &self.username)
      .field("password", &"********")
      .finish()
  }
}

/// Why credentials could not be looked up.
#[derive(Debug, Error)]
pub enum CredentialError {
  /// No home directory to look for `.netrc` in.
  #[error("cannot locate home directory (HOME is not set)")]
  NoHomeDirectory,

  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A token that needs a value ended the file.
  #[error("malformed .netrc: {0}")]
  Parse(String),

  /// Neither the flags nor any provider supplied both halves.
  #[error(
    "no credentials for {host}; pass --user and --password, set CONFLUENCE_USER and CONFLUENCE_PASSWORD, or add the host to ~/.netrc"
  )]
  Missing { host: String },
}
