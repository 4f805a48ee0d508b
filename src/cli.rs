//! Command-line interface definitions for confluence-rest.

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use url::Url;

use crate::color::ColorScheme;
use crate::commands::auth::handle_auth_command;
use crate::commands::content::{handle_content_command, handle_search_command};
use crate::commands::spaces::{handle_space_command, handle_spaces_command};
use crate::commands::version::handle_version_command;
use crate::models::{ContentType, SpaceType};
use crate::transport::DEFAULT_TIMEOUT_SECS;

/// confluence-rest - Query a Confluence Server instance over its REST API
#[derive(Debug, Parser)]
#[command(
  name = "confluence-rest",
  version,
  about = "Query a Confluence Server instance over its REST API",
  long_about = "A command-line companion to the confluence_rest library.\n\
                Lists spaces, fetches and searches content, and prints results as JSON lines.",
  styles = get_clap_styles()
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,

  #[command(flatten)]
  pub auth: AuthOptions,

  #[command(flatten)]
  pub behavior: BehaviorOptions,

  #[command(flatten)]
  pub network: NetworkOptions,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Authentication testing and inspection
  Auth {
    #[command(subcommand)]
    subcommand: AuthCommand,
  },

  /// List spaces
  Spaces {
    /// Only these space keys (repeatable)
    #[arg(long = "key", value_name = "KEY")]
    keys: Vec<String>,

    /// Only spaces of this type
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    space_type: Option<SpaceTypeArg>,

    /// Stop after N spaces
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
  },

  /// Show one space
  Space {
    #[arg(value_name = "KEY")]
    key: String,
  },

  /// Fetch or list pages and blog posts
  Content {
    #[command(subcommand)]
    subcommand: ContentCommand,
  },

  /// Run a CQL query
  Search {
    #[arg(value_name = "CQL")]
    cql: String,

    /// Stop after N results
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
  },

  /// Display version and build information
  Version {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Show only version number
    #[arg(long)]
    short: bool,
  },
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
  /// Call the API as the configured user
  Test,
  /// Show where each credential comes from
  Show,
}

#[derive(Debug, Subcommand)]
pub enum ContentCommand {
  /// Fetch one page by id or URL
  Get {
    /// Page URL or numeric page ID
    #[arg(value_name = "PAGE_URL_OR_ID")]
    target: String,

    /// Fields to expand, e.g. body.storage (repeatable)
    #[arg(long, value_name = "FIELD")]
    expand: Vec<String>,
  },

  /// List pages or blog posts of a space
  List {
    /// Space key
    #[arg(long, value_name = "KEY")]
    space: String,

    #[arg(long = "type", value_enum, default_value = "page", value_name = "TYPE")]
    content_type: ContentTypeArg,

    /// Exact title to match
    #[arg(long)]
    title: Option<String>,

    /// Stop after N results
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpaceTypeArg {
  Global,
  Personal,
}

impl From<SpaceTypeArg> for SpaceType {
  fn from(value: SpaceTypeArg) -> Self {
    match value {
      SpaceTypeArg::Global => SpaceType::Global,
      SpaceTypeArg::Personal => SpaceType::Personal,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentTypeArg {
  Page,
  Blogpost,
}

impl From<ContentTypeArg> for ContentType {
  fn from(value: ContentTypeArg) -> Self {
    match value {
      ContentTypeArg::Page => ContentType::Page,
      ContentTypeArg::Blogpost => ContentType::BlogPost,
    }
  }
}

/// Normalize a URL by adding https:// if no scheme is present
fn normalize_url(url: &str) -> Result<String, String> {
  let trimmed = url.trim();

  let parsed = match Url::parse(trimmed) {
    Ok(parsed) => parsed,
    Err(_) => Url::parse(&format!("https://{trimmed}")).map_err(|e| format!("Invalid URL: {e}"))?,
  };

  let mut url_str = parsed.to_string();
  if url_str.ends_with('/') && url_str.len() > 1 {
    url_str.pop();
  }

  Ok(url_str)
}

/// Authentication options
#[derive(Debug, Parser)]
pub struct AuthOptions {
  /// Confluence base URL, including any context path
  #[arg(long, env = "CONFLUENCE_URL", value_name = "URL", value_parser = normalize_url)]
  pub url: Option<String>,

  /// Confluence username
  #[arg(long, env = "CONFLUENCE_USER", value_name = "USER")]
  pub user: Option<String>,

  /// Password or personal access token
  #[arg(long, env = "CONFLUENCE_PASSWORD", value_name = "PASSWORD", hide_env_values = true)]
  pub password: Option<String>,
}

/// Behavior options
#[derive(Debug, Parser)]
pub struct BehaviorOptions {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, value_enum, default_value = "auto", value_name = "WHEN")]
  pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorOption {
  Auto,
  Always,
  Never,
}

/// Network options
#[derive(Debug, Parser)]
pub struct NetworkOptions {
  /// Request timeout in seconds
  #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_name = "SECONDS")]
  pub timeout: u64,
}

impl Cli {
  /// Parse CLI arguments from the environment
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Check argument combinations clap cannot express.
  pub fn validate(&self) -> Result<(), String> {
    if self.network.timeout == 0 {
      return Err("--timeout must be at least 1 second".to_string());
    }

    let limit = match &self.command {
      Command::Spaces { limit, .. } | Command::Search { limit, .. } => *limit,
      Command::Content {
        subcommand: ContentCommand::List { limit, .. },
      } => *limit,
      _ => None,
    };
    if limit == Some(0) {
      return Err("--limit must be at least 1".to_string());
    }

    Ok(())
  }
}

/// Parse CLI arguments, initialize logging, and dispatch to the chosen
/// command.
pub fn run() {
  let cli = Cli::parse_args();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  if let Err(e) = cli.validate() {
    eprintln!("{} {}", colors.error("Error:"), e);
    process::exit(4); // Invalid arguments exit code
  }

  let result = match &cli.command {
    Command::Auth { subcommand } => handle_auth_command(subcommand, &cli, &colors),
    Command::Spaces {
      keys,
      space_type,
      limit,
    } => handle_spaces_command(keys, space_type.map(Into::into), *limit, &cli),
    Command::Space { key } => handle_space_command(key, &cli),
    Command::Content { subcommand } => handle_content_command(subcommand, &cli),
    Command::Search { cql, limit } => handle_search_command(cql, *limit, &cli),
    Command::Version { json, short } => handle_version_command(*json, *short, &colors),
  };

  if let Err(e) = result {
    eprintln!("{} {e:#}", colors.error("Error:"));
    process::exit(1);
  }
}

fn init_tracing(behavior: &BehaviorOptions) {
  let level = if behavior.quiet {
    LevelFilter::ERROR
  } else {
    match behavior.verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Get custom styles for clap help output
fn get_clap_styles() -> clap::builder::Styles {
  use clap::builder::styling::{AnsiColor, Effects};

  clap::builder::Styles::styled()
    .header(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .literal(AnsiColor::BrightGreen.on_default())
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
    .valid(AnsiColor::BrightGreen.on_default())
    .invalid(AnsiColor::BrightRed.on_default())
}
