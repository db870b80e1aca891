//! Implementation of the `bvars resolve` command.
//!
//! Resolves top-level build args the way `--build-arg` values are handled:
//! reserved names are refused and args without a value are read from the
//! process environment.

use anyhow::{Context, Result};
use tracing::info;

use buildvars_lib::builtin::BuiltinNames;
use buildvars_lib::env::ProcessEnv;
use buildvars_lib::parse_command_line_args;

use crate::output::{OutputFormat, print_scope};

pub fn cmd_resolve(args: &[String], builtins: &impl BuiltinNames, format: OutputFormat) -> Result<()> {
  let scope = parse_command_line_args(args, builtins, &ProcessEnv).context("Failed to resolve build args")?;
  info!(count = scope.len(), "resolved command-line build args");
  print_scope(&scope, format)
}
