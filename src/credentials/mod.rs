//! Credential discovery for the command line tool.
//!
//! Explicit `--user`/`--password` flags (or their environment variables) win;
//! anything missing is filled in from the first [`CredentialsProvider`] that
//! knows the Confluence host, which by default is `~/.netrc`:
//!
//! ```text
//! machine wiki.example.com
//!   login jdoe
//!   password correct-horse-battery-staple
//! ```

mod netrc;
mod provider;
mod types;

pub use netrc::NetrcProvider;
pub use provider::{CredentialsProvider, resolve};
pub use types::{Credential, CredentialError};
