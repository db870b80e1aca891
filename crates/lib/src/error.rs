//! Errors produced while resolving build arguments.

use thiserror::Error;

/// Errors that can occur while turning argument tokens into bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
  /// The token could not be split into a name and value.
  ///
  /// A first-occurrence split on `=` always yields a name, so no code path
  /// currently produces this variant.
  #[error("invalid build arg {0}")]
  Malformed(String),

  #[error("built-in arg {0} cannot be passed on the command line")]
  BuiltinOnCommandLine(String),

  #[error("value cannot be specified for built-in build arg {0}")]
  BuiltinOverride(String),

  #[error("env var {0} not set")]
  EnvNotSet(String),

  #[error("value not specified for build arg {0} and no value can be inferred")]
  CannotInfer(String),

  #[error("non-constant value for build arg {name} cannot be evaluated: {expression}")]
  NonConstant { name: String, expression: String },

  /// A build-step argument failed; `arg` is the raw token as supplied.
  #[error("parse build arg {arg}: {source}")]
  BuildArg {
    arg: String,
    #[source]
    source: Box<ArgError>,
  },
}

impl ArgError {
  /// Returns the innermost error, unwrapping any [`ArgError::BuildArg`] context.
  pub fn root_cause(&self) -> &ArgError {
    match self {
      ArgError::BuildArg { source, .. } => source.root_cause(),
      other => other,
    }
  }
}
