//! Implementation of the `bvars build-args` command.
//!
//! Resolves build-step args against an enclosing context assembled from the
//! command line: `--active NAME=VALUE` pairs, optionally layered over the
//! process environment.

use anyhow::{Context, Result};
use tracing::{debug, info};

use buildvars_lib::args::Unevaluated;
use buildvars_lib::builtin::BuiltinNames;
use buildvars_lib::{Collection, parse_args, parse_env_vars};

use crate::output::{OutputFormat, print_scope};

pub fn cmd_build_args(
  args: &[String],
  active: &[String],
  inherit_env: bool,
  builtins: &impl BuiltinNames,
  format: OutputFormat,
) -> Result<()> {
  let current = enclosing_context(active, inherit_env);
  let scope = parse_args(args, &Unevaluated, &current, builtins).context("Failed to resolve build args")?;
  info!(count = scope.len(), "resolved build-step args");
  print_scope(&scope, format)
}

/// Process environment (outermost, if requested) followed by the `--active` pairs.
fn enclosing_context(active: &[String], inherit_env: bool) -> Collection {
  let mut current = Collection::new();
  if inherit_env {
    let env: Vec<String> = std::env::vars_os()
      .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
      .collect();
    let scope = parse_env_vars(&env);
    debug!(count = scope.len(), "inheriting process environment");
    current.push(scope);
  }
  current.push(parse_env_vars(active));
  current
}

#[cfg(test)]
mod tests {
  use super::*;
  use buildvars_lib::ActiveLookup;

  #[test]
  fn active_pairs_shadow_nothing_without_env() {
    let current = enclosing_context(&["IMAGE=alpine".to_string(), "bogus".to_string()], false);
    assert_eq!(current.depth(), 1);
    assert_eq!(current.get_active("IMAGE"), Some("alpine"));
    assert_eq!(current.get_active("bogus"), None);
  }

  #[test]
  fn active_pairs_are_innermost() {
    let current = enclosing_context(&["PATH=/opt/bin".to_string()], true);
    assert_eq!(current.depth(), 2);
    assert_eq!(current.get_active("PATH"), Some("/opt/bin"));
  }
}
