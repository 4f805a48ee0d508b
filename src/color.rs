//! Terminal styling for the command line tool.

use std::fmt::Display;

use owo_colors::{OwoColorize, Style};

use crate::cli::ColorOption;

/// Semantic styles, disabled entirely when color is off.
pub struct ColorScheme {
  enabled: bool,
}

impl ColorScheme {
  /// Resolve `--color`; `auto` enables color only when stdout is a terminal.
  pub fn new(color_option: ColorOption) -> Self {
    let enabled = match color_option {
      ColorOption::Always => true,
      ColorOption::Never => false,
      ColorOption::Auto => {
        use std::io::IsTerminal;
        std::io::stdout().is_terminal()
      }
    };

    Self { enabled }
  }

  fn paint<T: Display>(&self, text: T, style: Style) -> String {
    if self.enabled {
      text.style(style).to_string()
    } else {
      text.to_string()
    }
  }

  pub fn success<T: Display>(&self, text: T) -> String {
    self.paint(text, Style::new().green())
  }

  pub fn error<T: Display>(&self, text: T) -> String {
    self.paint(text, Style::new().bright_red().bold())
  }

  pub fn warning<T: Display>(&self, text: T) -> String {
    self.paint(text, Style::new().yellow())
  }

  pub fn info<T: Display>(&self, text: T) -> String {
    self.paint(text, Style::new().cyan())
  }

  pub fn emphasis<T: Display>(&self, text: T) -> String {
    self.paint(text, Style::new().bright_white().bold())
  }

  pub fn link<T: Display>(&self, text: T) -> String {
    self.paint(text, Style::new().blue().underline())
  }

  pub fn number<T: Display>(&self, text: T) -> String {
    self.paint(text, Style::new().bright_blue())
  }

  pub fn code<T: Display>(&self, text: T) -> String {
    self.paint(text, Style::new().bright_green())
  }

  pub fn dimmed<T: Display>(&self, text: T) -> String {
    self.paint(text, Style::new().dimmed())
  }
}
