//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output: colored status
//! messages, scope listings and JSON.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use buildvars_lib::Scope;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const ACTIVE: &str = "●";
  pub const INACTIVE: &str = "○";
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_warning(message: &str) {
  println!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stdout, |s| s.yellow()),
    message.if_supports_color(Stream::Stdout, |s| s.yellow())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Render one binding as `NAME=VALUE`, marked active or inactive.
pub fn format_binding(name: &str, value: &str, active: bool) -> String {
  let marker = if active { symbols::ACTIVE } else { symbols::INACTIVE };
  format!("{} {}={}", marker, name, value)
}

/// Print a scope in insertion order, either as text lines or as a JSON object.
pub fn print_scope(scope: &Scope, format: OutputFormat) -> anyhow::Result<()> {
  if format.is_json() {
    return print_json(scope);
  }
  for (name, binding) in scope.iter() {
    println!("{}", format_binding(name, &binding.value, binding.active));
  }
  Ok(())
}
