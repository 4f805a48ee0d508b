//! The provider seam and the lookup order built on it.

use tracing::debug;

use super::{Credential, CredentialError};

/// A source of credentials keyed by host name.
pub trait CredentialsProvider {
  /// Credentials stored for `host`, or `Ok(None)` so the next source can be
  /// tried.
  ///
  /// # Errors
  /// Only for sources that exist but cannot be read or parsed.
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError>;
}

/// Combine explicit values with the first provider that knows `host`.
///
/// Explicit values always win; a provider is consulted only when one of them
/// is missing, and may fill in either half.
///
/// # Errors
/// [`CredentialError::Missing`] when no complete pair can be assembled, or
/// whatever a provider reports.
pub fn resolve(
  host: &str,
  username: Option<&str>,
  password: Option<&str>,
  providers: &[&dyn CredentialsProvider],
) -> Result<Credential, CredentialError> {
  if let (Some(username), Some(password)) = (username, password) {
    return Ok(Credential::new(username, password));
  }

  for provider in providers {
    if let Some(stored) = provider.get_credentials(host)? {
      debug!(host, "using stored credentials");
      return Ok(Credential {
        username: username.map_or(stored.username, str::to_string),
        password: password.map_or(stored.password, str::to_string),
      });
    }
  }

  Err(CredentialError::Missing { host: host.to_string() })
}
