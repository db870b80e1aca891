//! Environment lookups for command-line arguments given without a value.

use std::collections::HashMap;

use crate::error::ArgError;

/// Read-only access to an environment.
pub trait EnvLookup {
  /// Returns the value of `name`, or `None` if it is not set.
  ///
  /// A variable that is set to the empty string yields `Some("")`.
  fn lookup_env(&self, name: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
  fn lookup_env(&self, name: &str) -> Option<String> {
    // Names the platform cannot represent (empty, containing `=` or NUL) are never set.
    if name.is_empty() || name.contains(['=', '\0']) {
      return None;
    }
    std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
  }
}

impl EnvLookup for HashMap<String, String> {
  fn lookup_env(&self, name: &str) -> Option<String> {
    self.get(name).cloned()
  }
}

/// Resolve `name` from `env`, failing if it is not set.
pub fn resolve_env(name: &str, env: &impl EnvLookup) -> Result<String, ArgError> {
  env.lookup_env(name).ok_or_else(|| ArgError::EnvNotSet(name.to_string()))
}
