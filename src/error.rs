//! Typed failures surfaced by the Confluence client.
//!
//! Server-side failures are classified by HTTP status and always carry the
//! request path, the query parameters that were sent, and the raw response so
//! callers can inspect what the server actually said. Local argument checks
//! and decode failures have their own variants.

use std::path::PathBuf;

use thiserror::Error;

/// Query parameters in the order they are sent on the wire.
pub type Params = Vec<(String, String)>;

/// Convenience alias used throughout the library.
pub type Result<T, E = ConfluenceError> = std::result::Result<T, E>;

/// Status code and body of a single HTTP exchange, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
  /// HTTP status code returned by the server.
  pub status: u16,
  /// Unparsed response body.
  pub body: Vec<u8>,
}

impl RawResponse {
  /// Build a response from a status code and body bytes.
  pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  /// Whether the status is in the 2xx range.
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  /// Body decoded as UTF-8, replacing invalid sequences.
  pub fn text(&self) -> String {
    String::from_utf8_lossy(&self.body).into_owned()
  }
}

/// Request details attached to every failure reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
  /// Path relative to the base URL (e.g. `/rest/api/content/123`).
  pub path: String,
  /// Query parameters sent with the request.
  pub params: Params,
  /// The response exactly as received.
  pub response: RawResponse,
}

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum ConfluenceError {
  /// HTTP 400, also the catch-all for requests the server rejected.
  #[error("General resource error accessing path {}", .0.path)]
  BadRequest(Box<RequestFailure>),

  /// HTTP 401.
  #[error("Authentication failure accessing path {}, most likely an incorrect username/password", .0.path)]
  Authentication(Box<RequestFailure>),

  /// HTTP 403.
  #[error("User has insufficient permissions to perform that operation on the path {}", .0.path)]
  PermissionDenied(Box<RequestFailure>),

  /// HTTP 404. Confluence also answers 404 when the caller cannot see the
  /// resource.
  #[error("Resource was not found at path {} or the user has insufficient permissions", .0.path)]
  NotFound(Box<RequestFailure>),

  /// HTTP 409, typically a version number that is not current + 1.
  #[error("The given version does not match the expected next version of the resource at path {}", .0.path)]
  VersionConflict(Box<RequestFailure>),

  /// HTTP 413.
  #[error("Resource posted to path {} was too large", .0.path)]
  PayloadTooLarge(Box<RequestFailure>),

  /// Any other non-2xx status.
  #[error("Confluence returned unexpected status {} for path {}", .0.response.status, .0.path)]
  Unclassified(Box<RequestFailure>),

  /// Caller-supplied arguments rejected before any request was made.
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),

  /// A response body did not match the expected shape.
  #[error("Malformed response from path {path}: {source}")]
  MalformedResponse {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  /// The HTTP exchange itself failed (connection, TLS, timeout).
  #[error("Failed to send request to Confluence: {0}")]
  Transport(#[from] reqwest::Error),

  /// A local file needed for the request could not be read.
  #[error("Failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The configured base URL is not an absolute `http` or `https` URL.
  #[error("Invalid base URL {url}: {reason}")]
  InvalidBaseUrl { url: String, reason: String },
}

impl ConfluenceError {
  /// Shorthand for building an [`ConfluenceError::InvalidArgument`].
  pub(crate) fn invalid(message: impl Into<String>) -> Self {
    Self::InvalidArgument(message.into())
  }

  /// The request details for failures reported by the server.
  pub fn failure(&self) -> Option<&RequestFailure> {
    match self {
      Self::BadRequest(f)
      | Self::Authentication(f)
      | Self::PermissionDenied(f)
      | Self::NotFound(f)
      | Self::VersionConflict(f)
      | Self::PayloadTooLarge(f)
      | Self::Unclassified(f) => Some(f),
      _ => None,
    }
  }

  /// HTTP status of the failed response, if the server produced one.
  pub fn status(&self) -> Option<u16> {
    self.failure().map(|f| f.response.status)
  }

  /// Whether the server answered 404.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound(_))
  }
}

/// Map a response to a typed failure.
///
/// Returns `None` for 2xx responses. Every other status produces an error
/// carrying `path`, `params` and a copy of `response`.
pub fn error_for_status(path: &str, params: &[(String, String)], response: &RawResponse) -> Option<ConfluenceError> {
  if response.is_success() {
    return None;
  }

  let failure = Box::new(RequestFailure {
    path: path.to_string(),
    params: params.to_vec(),
    response: response.clone(),
  });

  Some(match response.status {
    400 => ConfluenceError::BadRequest(failure),
    401 => ConfluenceError::Authentication(failure),
    403 => ConfluenceError::PermissionDenied(failure),
    404 => ConfluenceError::NotFound(failure),
    409 => ConfluenceError::VersionConflict(failure),
    413 => ConfluenceError::PayloadTooLarge(failure),
    _ => ConfluenceError::Unclassified(failure),
  })
}
