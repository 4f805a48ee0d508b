//! confluence-rest - query a Confluence Server instance from the shell
//!
//! Thin entry point; argument parsing and dispatch live in
//! [`confluence_rest::cli`].

fn main() {
  confluence_rest::cli::run();
}
