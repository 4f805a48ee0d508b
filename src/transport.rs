//! The HTTP seam between the client and the network.
//!
//! [`Transport`] performs exactly one exchange and hands back the raw status
//! and body; status classification and JSON decoding happen in the client.
//! Tests substitute their own implementation.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::blocking::{Client, multipart};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::info;
use url::Url;

use crate::error::{ConfluenceError, RawResponse, Result};
use crate::request::{ApiRequest, MultipartForm, RequestBody};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Performs single HTTP exchanges against a Confluence instance.
pub trait Transport {
  /// Send `request` and return the response without interpreting it.
  ///
  /// # Errors
  /// Only for failures that prevent a response from being received at all
  /// (connection, TLS, timeout, unreadable body). Non-2xx statuses are
  /// returned as ordinary responses.
  fn send(&self, request: &ApiRequest) -> Result<RawResponse>;

  /// Acquire a reusable connection for subsequent requests.
  fn open(&mut self) -> Result<()> {
    Ok(())
  }

  /// Release whatever [`Transport::open`] acquired. Must be idempotent.
  fn close(&mut self) {}
}

/// [`Transport`] backed by a blocking `reqwest` client using HTTP Basic auth.
///
/// Outside a session each request builds a one-shot client; between
/// [`Transport::open`] and [`Transport::close`] a single client (and its
/// connection pool) is reused.
pub struct HttpTransport {
  base_url: String,
  username: String,
  password: String,
  timeout: Duration,
  session: Option<Client>,
}

impl HttpTransport {
  /// Create a transport for the instance at `base_url`.
  ///
  /// # Arguments
  /// * `base_url` - Where the Confluence web app lives, including any context
  ///   path (e.g. `https://wiki.example.com/confluence`).
  /// * `username` - Login used for Basic auth.
  /// * `password` - Password or personal access token.
  /// * `timeout_secs` - Per-request timeout in seconds.
  ///
  /// # Errors
  /// Returns [`ConfluenceError::InvalidBaseUrl`] when `base_url` does not
  /// parse as an absolute URL or its scheme is not `http` or `https`.
  pub fn new(
    base_url: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
    timeout_secs: u64,
  ) -> Result<Self> {
    let base_url = base_url.into();
    let invalid = |reason: String| ConfluenceError::InvalidBaseUrl {
      url: base_url.clone(),
      reason,
    };
    let parsed = Url::parse(&base_url).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
      return Err(invalid(format!("unsupported scheme `{}`", parsed.scheme())));
    }

    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      username: username.into(),
      password: password.into(),
      timeout: Duration::from_secs(timeout_secs),
      session: None,
    })
  }

  /// Base URL with any trailing slash removed.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Whether a reusable connection is currently held.
  pub fn is_open(&self) -> bool {
    self.session.is_some()
  }

  fn build_client(&self) -> Result<Client> {
    let client = Client::builder()
      .timeout(self.timeout)
      .user_agent(format!(
        "confluence-rest/{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("TARGET")
      ))
      .build()?;
    Ok(client)
  }

  /// Get the authorization header value (Basic auth).
  fn auth_header(&self) -> String {
    let credentials = format!("{}:{}", self.username, self.password);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }
}

fn multipart_form(form: &MultipartForm) -> Result<multipart::Form> {
  let mut multipart = multipart::Form::new();

  for (name, value) in &form.fields {
    multipart = multipart.text(name.clone(), value.clone());
  }

  for file in &form.files {
    let mut part = multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
    if let Some(media_type) = &file.media_type {
      part = part.mime_str(media_type)?;
    }
    multipart = multipart.part(file.field.clone(), part);
  }

  Ok(multipart)
}

impl Transport for HttpTransport {
  fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
    let one_shot;
    let client = match &self.session {
      Some(client) => client,
      None => {
        one_shot = self.build_client()?;
        &one_shot
      }
    };

    let mut builder = client
      .request(request.method.clone(), self.url(&request.path))
      .header(AUTHORIZATION, self.auth_header())
      .header(ACCEPT, "application/json")
      .header("X-Atlassian-Token", "nocheck");

    if !request.params.is_empty() {
      builder = builder.query(&request.params);
    }

    builder = match &request.body {
      RequestBody::Empty => builder,
      RequestBody::Json(body) => builder.json(body),
      RequestBody::Multipart(form) => builder.multipart(multipart_form(form)?),
    };

    let response = builder.send()?;
    let status = response.status().as_u16();
    let body = response.bytes()?;

    Ok(RawResponse::new(status, body.to_vec()))
  }

  fn open(&mut self) -> Result<()> {
    if self.session.is_none() {
      self.session = Some(self.build_client()?);
      info!(base_url = %self.base_url, "opened Confluence session");
    }
    Ok(())
  }

  fn close(&mut self) {
    if self.session.take().is_some() {
      info!(base_url = %self.base_url, "closed Confluence session");
    }
  }
}
