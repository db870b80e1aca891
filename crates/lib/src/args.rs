//! Build argument resolution.
//!
//! Arguments arrive as `NAME[=VALUE]` tokens from three places, each with its
//! own resolver:
//!
//! - [`parse_command_line_args`] - top-level `--build-arg` values. Reserved
//!   names are rejected outright and a missing value is read from the
//!   environment.
//! - [`parse_args`] - arguments passed to a build step (e.g. a nested target).
//!   A missing value is inherited from the active bindings of the enclosing
//!   context, which is also the only way a reserved name may appear.
//! - [`parse_env_vars`] - system-sourced `KEY=VALUE` pairs, parsed leniently.
//!
//! The first two are fail-fast and produce inactive bindings; the last one
//! produces active bindings and never fails.

use tracing::debug;

use crate::builtin::{BuiltinNames, GuardMode, check};
use crate::env::{EnvLookup, resolve_env};
use crate::error::ArgError;
use crate::scope::{ActiveLookup, Scope, resolve_active};

/// One `NAME[=VALUE]` token, split at the first `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgToken {
  pub name: String,
  /// `None` when the token had no `=`; `Some("")` for `NAME=`.
  pub value: Option<String>,
}

impl ArgToken {
  pub fn has_value(&self) -> bool {
    self.value.is_some()
  }
}

/// Split a token at its first `=`.
///
/// Everything after the first `=` is the value, so `A=b=c` binds `A` to `b=c`.
///
/// ```
/// use buildvars_lib::args::split;
///
/// let token = split("IMAGE=alpine:3.19").unwrap();
/// assert_eq!(token.name, "IMAGE");
/// assert_eq!(token.value.as_deref(), Some("alpine:3.19"));
/// assert!(!split("IMAGE").unwrap().has_value());
/// ```
pub fn split(token: &str) -> Result<ArgToken, ArgError> {
  let mut parts = token.splitn(2, '=');
  let Some(name) = parts.next() else {
    return Err(ArgError::Malformed(token.to_string()));
  };
  Ok(ArgToken {
    name: name.to_string(),
    value: parts.next().map(str::to_string),
  })
}

/// Split a `KEY=VALUE` entry, returning `None` if it has no `=`.
pub fn parse_key_value(entry: &str) -> Option<(String, String)> {
  entry
    .split_once('=')
    .map(|(key, value)| (key.to_string(), value.to_string()))
}

/// Result of evaluating a non-constant argument expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonConstantValue {
  pub value: String,
  /// Position of the argument the value was produced for.
  pub arg_index: usize,
}

/// Evaluates a non-constant argument expression (e.g. a command substitution)
/// into a value.
pub trait NonConstantEvaluator {
  fn evaluate(&self, name: &str, expression: &str) -> Result<NonConstantValue, ArgError>;
}

impl<F> NonConstantEvaluator for F
where
  F: Fn(&str, &str) -> Result<NonConstantValue, ArgError>,
{
  fn evaluate(&self, name: &str, expression: &str) -> Result<NonConstantValue, ArgError> {
    self(name, expression)
  }
}

/// An evaluator that refuses every expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unevaluated;

impl NonConstantEvaluator for Unevaluated {
  fn evaluate(&self, name: &str, expression: &str) -> Result<NonConstantValue, ArgError> {
    Err(ArgError::NonConstant {
      name: name.to_string(),
      expression: expression.to_string(),
    })
  }
}

/// Resolve top-level command-line build args into a scope of inactive bindings.
///
/// Reserved names are rejected whether or not a value is given. An argument
/// without a value takes its value from `env`.
///
/// # Errors
///
/// Fails on the first reserved name or unset environment variable.
pub fn parse_command_line_args<S: AsRef<str>>(
  args: &[S],
  builtins: &impl BuiltinNames,
  env: &impl EnvLookup,
) -> Result<Scope, ArgError> {
  let mut scope = Scope::new();
  for arg in args {
    let token = split(arg.as_ref())?;
    check(GuardMode::Strict, &token, builtins)?;
    let value = match token.value {
      Some(value) => value,
      None => {
        let value = resolve_env(&token.name, env)?;
        debug!(name = %token.name, "build arg value taken from environment");
        value
      }
    };
    scope.add_inactive(token.name, value);
  }
  Ok(scope)
}

/// Resolve build-step args into a scope of inactive bindings.
///
/// An argument without a value inherits the active binding of the same name
/// from `current`. Reserved names may only appear in that form.
///
/// `_evaluator` is the hook for non-constant values; constant resolution
/// never calls it.
///
/// # Errors
///
/// Fails on the first invalid argument, wrapped in [`ArgError::BuildArg`].
pub fn parse_args<S: AsRef<str>>(
  args: &[S],
  _evaluator: &impl NonConstantEvaluator,
  current: &impl ActiveLookup,
  builtins: &impl BuiltinNames,
) -> Result<Scope, ArgError> {
  let mut scope = Scope::new();
  for arg in args {
    let arg: &str = arg.as_ref();
    let (name, value) = parse_arg(arg, current, builtins).map_err(|source| ArgError::BuildArg {
      arg: arg.to_string(),
      source: Box::new(source),
    })?;
    scope.add_inactive(name, value);
  }
  Ok(scope)
}

fn parse_arg(
  arg: &str,
  current: &impl ActiveLookup,
  builtins: &impl BuiltinNames,
) -> Result<(String, String), ArgError> {
  let token = split(arg)?;
  check(GuardMode::Overlay, &token, builtins)?;
  match token.value {
    Some(value) => Ok((token.name, value)),
    None => {
      let value = resolve_active(&token.name, current)?;
      debug!(name = %token.name, "build arg value inherited from active scope");
      Ok((token.name, value))
    }
  }
}

/// Parse `KEY=VALUE` entries into a scope of active bindings.
///
/// Entries without `=` are skipped.
pub fn parse_env_vars<S: AsRef<str>>(entries: &[S]) -> Scope {
  let mut scope = Scope::new();
  for entry in entries {
    let entry: &str = entry.as_ref();
    match parse_key_value(entry) {
      Some((key, value)) => scope.add_active(key, value),
      None => debug!(entry = %entry, "skipping env entry without '='"),
    }
  }
  scope
}
