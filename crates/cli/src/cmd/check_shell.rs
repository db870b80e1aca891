//! Implementation of the `bvars check-shell` command.

use anyhow::Result;
use serde::Serialize;

use buildvars_lib::contains_shell;

use crate::output::{OutputFormat, print_json, print_success, print_warning};

#[derive(Debug, Serialize)]
struct ShellCheck<'a> {
  value: &'a str,
  contains_shell: bool,
}

/// Report which values contain an unguarded `$(...)`.
///
/// Returns `true` if any of them does.
pub fn cmd_check_shell(values: &[String], format: OutputFormat) -> Result<bool> {
  let checks: Vec<ShellCheck<'_>> = values
    .iter()
    .map(|value| ShellCheck {
      value,
      contains_shell: contains_shell(value),
    })
    .collect();

  if format.is_json() {
    print_json(&checks)?;
  } else {
    for check in &checks {
      if check.contains_shell {
        print_warning(&format!("{}: command substitution", check.value));
      } else {
        print_success(&format!("{}: literal", check.value));
      }
    }
  }

  Ok(checks.iter().any(|c| c.contains_shell))
}
