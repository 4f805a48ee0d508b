//! The [`Confluence`] facade, its request executor and scoped sessions.
//!
//! Domain operations live in the `api` modules as further `impl` blocks on
//! [`Confluence`]; this module holds what they share.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ConfluenceError, RawResponse, Result, error_for_status};
use crate::paging::Paged;
use crate::request::ApiRequest;
use crate::transport::{DEFAULT_TIMEOUT_SECS, HttpTransport, Transport};

/// Entry point for every Confluence REST operation.
///
/// Without a [`Session`] each request goes out on a one-shot connection.
pub struct Confluence<Tr: Transport = HttpTransport> {
  transport: Tr,
}

impl Confluence<HttpTransport> {
  /// Create a client for the instance at `base_url` using Basic auth.
  ///
  /// # Arguments
  /// * `base_url` - Where the Confluence web app lives, e.g.
  ///   `https://wiki.example.com/confluence`.
  /// * `username` - Login name.
  /// * `password` - Password or personal access token.
  ///
  /// # Errors
  /// Returns [`ConfluenceError::InvalidBaseUrl`] if `base_url` is not an
  /// absolute `http` or `https` URL.
  pub fn new(base_url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
    Self::with_timeout(base_url, username, password, DEFAULT_TIMEOUT_SECS)
  }

  /// Like [`Confluence::new`] with an explicit per-request timeout.
  pub fn with_timeout(
    base_url: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
    timeout_secs: u64,
  ) -> Result<Self> {
    let transport = HttpTransport::new(base_url, username, password, timeout_secs)?;
    Ok(Self::with_transport(transport))
  }

  /// Base URL requests are resolved against.
  pub fn base_url(&self) -> &str {
    self.transport.base_url()
  }
}

impl<Tr: Transport> Confluence<Tr> {
  /// Wrap an existing transport.
  pub fn with_transport(transport: Tr) -> Self {
    Self { transport }
  }

  pub fn transport(&self) -> &Tr {
    &self.transport
  }

  /// Open a reusable connection for the lifetime of the returned guard.
  ///
  /// The connection is closed when the guard is dropped, including on early
  /// return and unwinding.
  ///
  /// # Errors
  /// Whatever the transport reports while opening the connection.
  pub fn session(&mut self) -> Result<Session<'_, Tr>> {
    self.transport.open()?;
    Ok(Session { client: self })
  }

  /// Send one request and classify the response status.
  pub(crate) fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
    debug!(method = %request.method, path = %request.path, "sending request");
    let response = self.transport.send(&request)?;
    debug!(
      method = %request.method,
      path = %request.path,
      status = response.status,
      "received response"
    );

    match error_for_status(&request.path, &request.params, &response) {
      Some(err) => Err(err),
      None => Ok(response),
    }
  }

  /// Send one request and decode the JSON body into `T`.
  pub(crate) fn execute_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
    let path = request.path.clone();
    let response = self.execute(request)?;
    decode(&path, &response.body)
  }

  /// Send one request whose response body is irrelevant.
  pub(crate) fn execute_unit(&self, request: ApiRequest) -> Result<()> {
    self.execute(request).map(drop)
  }

  /// Lazily iterate a paginated collection starting at `first`.
  pub(crate) fn paged<T: DeserializeOwned>(&self, first: ApiRequest) -> Paged<'_, T, Tr> {
    Paged::new(self, first)
  }

  /// Like [`Confluence::paged`], walking each collection in turn.
  pub(crate) fn paged_chain<T: DeserializeOwned>(&self, starts: Vec<ApiRequest>) -> Paged<'_, T, Tr> {
    Paged::chained(self, starts)
  }
}

impl<Tr: Transport> fmt::Debug for Confluence<Tr> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Confluence").finish_non_exhaustive()
  }
}

/// Decode a JSON response body, attributing failures to `path`.
pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T> {
  serde_json::from_slice(body).map_err(|source| ConfluenceError::MalformedResponse {
    path: path.to_string(),
    source,
  })
}

/// A [`Confluence`] client holding an open, reusable connection.
///
/// Dereferences to the client, so every operation is available on the guard.
pub struct Session<'a, Tr: Transport = HttpTransport> {
  client: &'a mut Confluence<Tr>,
}

impl<Tr: Transport> Deref for Session<'_, Tr> {
  type Target = Confluence<Tr>;

  fn deref(&self) -> &Self::Target {
    &*self.client
  }
}

impl<Tr: Transport> DerefMut for Session<'_, Tr> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut *self.client
  }
}

impl<Tr: Transport> Drop for Session<'_, Tr> {
  fn drop(&mut self) {
    self.client.transport.close();
  }
}
