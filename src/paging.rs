//! Lazy iteration over paginated collection endpoints.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::client::{Confluence, decode};
use crate::error::{ConfluenceError, Result};
use crate::request::ApiRequest;
use crate::transport::{HttpTransport, Transport};

#[derive(Debug, Deserialize)]
struct PageEnvelope {
  results: Vec<Value>,
  #[serde(rename = "_links", default)]
  links: PageLinks,
}

#[derive(Debug, Default, Deserialize)]
struct PageLinks {
  next: Option<String>,
}

/// Iterator over every item of a paginated collection.
///
/// Nothing is requested until the first call to [`Iterator::next`]. Items
/// are decoded one at a time from the current page; when it runs dry the
/// server's `_links.next` link is requested verbatim (the link already
/// carries the original query parameters). The first failure is yielded as
/// `Err` and ends the iteration. Dropping the iterator early issues no
/// further requests.
///
/// A single iterator may walk several collections back to back; each starts
/// only once the previous one is exhausted.
pub struct Paged<'a, T, Tr: Transport = HttpTransport> {
  client: &'a Confluence<Tr>,
  pending: Option<ApiRequest>,
  queued: VecDeque<ApiRequest>,
  page: std::vec::IntoIter<Value>,
  page_path: String,
  _item: PhantomData<fn() -> T>,
}

impl<'a, T, Tr: Transport> Paged<'a, T, Tr> {
  pub(crate) fn new(client: &'a Confluence<Tr>, first: ApiRequest) -> Self {
    Self::chained(client, vec![first])
  }

  pub(crate) fn chained(client: &'a Confluence<Tr>, starts: Vec<ApiRequest>) -> Self {
    let mut queued = VecDeque::from(starts);
    let pending = queued.pop_front();
    Self {
      client,
      page_path: pending.as_ref().map(|r| r.path.clone()).unwrap_or_default(),
      pending,
      queued,
      page: Vec::new().into_iter(),
      _item: PhantomData,
    }
  }

  fn fetch(&mut self, request: ApiRequest) -> Result<()> {
    let path = request.path.clone();
    let response = self.client.execute(request)?;
    let envelope: PageEnvelope = decode(&path, &response.body)?;

    trace!(
      path = %path,
      results = envelope.results.len(),
      has_next = envelope.links.next.is_some(),
      "fetched page"
    );

    self.pending = envelope.links.next.map(ApiRequest::get);
    self.page = envelope.results.into_iter();
    self.page_path = path;
    Ok(())
  }

  fn stop(&mut self) {
    self.pending = None;
    self.queued.clear();
    self.page = Vec::new().into_iter();
  }
}

impl<T: DeserializeOwned, Tr: Transport> Iterator for Paged<'_, T, Tr> {
  type Item = Result<T>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(raw) = self.page.next() {
        return match serde_json::from_value(raw) {
          Ok(item) => Some(Ok(item)),
          Err(source) => {
            let path = self.page_path.clone();
            self.stop();
            Some(Err(ConfluenceError::MalformedResponse { path, source }))
          }
        };
      }

      // Empty pages that still carry a next link are followed.
      let request = self.pending.take().or_else(|| self.queued.pop_front())?;
      if let Err(err) = self.fetch(request) {
        self.stop();
        return Some(Err(err));
      }
    }
  }
}

impl<T: DeserializeOwned, Tr: Transport> FusedIterator for Paged<'_, T, Tr> {}

impl<T, Tr: Transport> fmt::Debug for Paged<'_, T, Tr> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Paged")
      .field("page_path", &self.page_path)
      .field("buffered", &self.page.len())
      .field("pending", &self.pending.as_ref().map(|r| r.path.as_str()))
      .finish_non_exhaustive()
  }
}
