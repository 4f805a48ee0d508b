//! Authentication subcommand handlers.
//!
//! `confluence-rest auth test` performs a live call as the configured user;
//! `confluence-rest auth show` prints where each credential comes from.

use anyhow::{Context, Result};

use super::{connect, extract_host};
use crate::cli::{AuthCommand, Cli};
use crate::color::ColorScheme;
use crate::credentials::{CredentialsProvider, NetrcProvider};

/// Dispatch the `auth` subcommands.
///
/// # Arguments
/// * `subcommand` - Auth-specific variant to execute.
/// * `cli` - Parsed CLI settings containing the connection options.
/// * `colors` - Shared color scheme used to render output consistently.
pub(crate) fn handle_auth_command(subcommand: &AuthCommand, cli: &Cli, colors: &ColorScheme) -> Result<()> {
  match subcommand {
    AuthCommand::Test => test_auth(cli, colors),
    AuthCommand::Show => {
      show_auth_config(cli, colors);
      Ok(())
    }
  }
}

fn test_auth(cli: &Cli, colors: &ColorScheme) -> Result<()> {
  let client = connect(cli)?;

  println!("{} {}", colors.info("→"), colors.info("Testing authentication"));
  println!("  {}: {}", colors.emphasis("URL"), colors.link(client.base_url()));

  let user = client.get_current_user().context("Authentication failed")?;

  println!(
    "\n{} {}",
    colors.success("✓"),
    colors.success("Authentication successful!")
  );
  println!("\n{}", colors.emphasis("User Information:"));
  if let Some(display_name) = &user.display_name {
    println!("  {}: {}", colors.emphasis("Display Name"), display_name);
  }
  println!("  {}: {}", colors.emphasis("Username"), user);
  if let Some(user_key) = &user.user_key {
    println!("  {}: {}", colors.emphasis("User Key"), colors.dimmed(user_key));
  }
  if user.username.is_none() {
    println!(
      "\n{} The server treated this request as anonymous; check the username and password.",
      colors.warning("⚠")
    );
  }

  Ok(())
}

/// Where a configured value came from.
fn source(env_var: &str, value: Option<&str>) -> &'static str {
  if std::env::var_os(env_var).is_some() {
    "environment variable"
  } else if value.is_some() {
    "command-line flag"
  } else {
    "not set"
  }
}

fn mask(secret: &str) -> String {
  let count = secret.chars().count();
  if count > 8 {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}{}", "*".repeat(count - 4))
  } else {
    "*".repeat(count)
  }
}

/// Display the configured base URL and credential sources.
fn show_auth_config(cli: &Cli, colors: &ColorScheme) {
  println!("{}\n", colors.emphasis("Authentication Configuration"));

  let url = cli.auth.url.as_deref();
  match url {
    Some(url_value) => {
      println!("{}: {}", colors.emphasis("Base URL"), colors.link(url_value));
      println!(
        "  {}: {}",
        colors.dimmed("Source"),
        colors.dimmed(source("CONFLUENCE_URL", url))
      );
    }
    None => println!("{}: {}", colors.emphasis("Base URL"), colors.dimmed("(not set)")),
  }

  let username = cli.auth.user.as_deref();
  let password = cli.auth.password.as_deref();

  let host = url.and_then(extract_host);
  let netrc = match (&host, username.is_none() || password.is_none()) {
    (Some(host), true) => NetrcProvider::new().get_credentials(host).ok().flatten(),
    _ => None,
  };

  if let Some(user_value) = username {
    println!("\n{}: {}", colors.emphasis("Username"), user_value);
    println!(
      "  {}: {}",
      colors.dimmed("Source"),
      colors.dimmed(source("CONFLUENCE_USER", username))
    );
  } else if let Some(stored) = &netrc {
    println!("\n{}: {}", colors.emphasis("Username"), stored.username);
    println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(".netrc file"));
  } else {
    println!("\n{}: {}", colors.emphasis("Username"), colors.dimmed("(not set)"));
  }

  if let Some(password_value) = password {
    println!("\n{}: {}", colors.emphasis("Password"), colors.dimmed(mask(password_value)));
    println!(
      "  {}: {}",
      colors.dimmed("Source"),
      colors.dimmed(source("CONFLUENCE_PASSWORD", password))
    );
  } else if netrc.is_some() {
    println!("\n{}: {}", colors.emphasis("Password"), colors.dimmed("********"));
    println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(".netrc file"));
  } else {
    println!("\n{}: {}", colors.emphasis("Password"), colors.dimmed("(not set)"));
  }

  if url.is_none() {
    println!(
      "\n{} {} is required for API access",
      colors.warning("⚠"),
      colors.emphasis("Base URL")
    );
    println!("  Set via --url flag or CONFLUENCE_URL environment variable");
  }

  let has_username = username.is_some() || netrc.is_some();
  let has_password = password.is_some() || netrc.is_some();

  if has_username && has_password {
    println!("\n{} {}", colors.success("✓"), colors.success("Credentials configured"));
    return;
  }

  println!(
    "\n{} {} for API access",
    colors.warning("⚠"),
    colors.warning("Credentials incomplete")
  );
  if !has_username {
    println!("  Missing: username (use --user or CONFLUENCE_USER)");
  }
  if !has_password {
    println!("  Missing: password (use --password or CONFLUENCE_PASSWORD)");
  }
  println!("\n  Or add credentials to ~/.netrc:");
  if let Some(host) = &host {
    println!("    machine {host}");
  }
  println!("      login your-username");
  println!("      password your-password");
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mask_keeps_short_secrets_hidden() {
    assert_eq!(mask("abc"), "***");
    assert_eq!(mask("abcdefghij"), "abcd******");
  }
}
