//! Scripted transport for testing
//!
//! Replays queued responses in order and records every request it receives,
//! so tests can assert both on what the client returned and on what it sent.

use std::cell::RefCell;
use std::collections::VecDeque;

use confluence_rest::{ApiRequest, Confluence, RawResponse, Result, Transport};
use serde_json::Value;

/// A transport that answers from a queue instead of the network.
#[derive(Default)]
pub struct FakeTransport {
  responses: RefCell<VecDeque<RawResponse>>,
  requests: RefCell<Vec<ApiRequest>>,
  opened: usize,
  closed: usize,
}

impl FakeTransport {
  pub fn new() -> Self {
    Self::default()
  }

  /// Queue a JSON response.
  pub fn respond(self, status: u16, body: Value) -> Self {
    self.responses.borrow_mut().push_back(json_response(status, body));
    self
  }

  /// Queue a response with a raw body.
  pub fn respond_raw(self, status: u16, body: &[u8]) -> Self {
    self.responses.borrow_mut().push_back(RawResponse::new(status, body.to_vec()));
    self
  }

  /// Wrap the transport in a client.
  pub fn into_client(self) -> Confluence<FakeTransport> {
    Confluence::with_transport(self)
  }

  /// Every request sent so far, oldest first.
  pub fn requests(&self) -> Vec<ApiRequest> {
    self.requests.borrow().clone()
  }

  pub fn request_count(&self) -> usize {
    self.requests.borrow().len()
  }

  /// The most recent request.
  pub fn last_request(&self) -> ApiRequest {
    self.requests.borrow().last().cloned().expect("no request was sent")
  }

  pub fn opened(&self) -> usize {
    self.opened
  }

  pub fn closed(&self) -> usize {
    self.closed
  }
}

impl Transport for FakeTransport {
  fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
    self.requests.borrow_mut().push(request.clone());
    let response = self
      .responses
      .borrow_mut()
      .pop_front()
      .unwrap_or_else(|| panic!("unexpected request: {} {}", request.method, request.path));
    Ok(response)
  }

  fn open(&mut self) -> Result<()> {
    self.opened += 1;
    Ok(())
  }

  fn close(&mut self) {
    self.closed += 1;
  }
}

pub fn json_response(status: u16, body: Value) -> RawResponse {
  RawResponse::new(status, body.to_string())
}
