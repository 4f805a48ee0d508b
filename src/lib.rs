//! Typed, blocking client for the Confluence Server REST API.
//!
//! [`Confluence`] wraps a [`Transport`] (by default [`HttpTransport`], a
//! reqwest client with HTTP Basic authentication) and exposes one method per
//! REST operation. Listing operations return a lazy [`Paged`] iterator that
//! follows the server's `_links.next` links on demand.
//!
//! ```no_run
//! use confluence_rest::{Confluence, ContentQuery};
//!
//! # fn main() -> confluence_rest::Result<()> {
//! let mut client = Confluence::new("https://wiki.example.com", "alice", "secret")?;
//! let session = client.session()?;
//! for page in session.get_content(&ContentQuery::pages().space("DOCS"))? {
//!   println!("{}", page?.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
mod client;
pub mod color;
pub mod commands;
pub mod credentials;
pub mod error;
pub mod models;
pub mod page_url;
mod paging;
pub mod request;
pub mod transport;

pub use api::{CommentQuery, ContentQuery, ContentUpdate, NewContent, SpaceQuery, UserRef};
pub use client::{Confluence, Session};
pub use error::{ConfluenceError, Params, RawResponse, RequestFailure, Result, error_for_status};
pub use paging::Paged;
pub use request::{ApiRequest, FilePart, MultipartForm, RequestBody};
pub use transport::{DEFAULT_TIMEOUT_SECS, HttpTransport, Transport};
