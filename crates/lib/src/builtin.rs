//! Reserved (built-in) argument names and the guard that enforces them.
//!
//! Built-in args are populated by the build tool itself: the target being
//! built, the platform triple, git metadata and so on. Users may reference
//! them, but the rules for *supplying* them depend on where the argument
//! comes from; see [`GuardMode`].

use std::collections::HashSet;

use crate::args::ArgToken;
use crate::error::ArgError;

/// Names reserved by the build tool.
pub const BUILTIN_ARGS: &[&str] = &[
  "EARTHLY_BUILD_SHA",
  "EARTHLY_CI",
  "EARTHLY_GIT_AUTHOR",
  "EARTHLY_GIT_BRANCH",
  "EARTHLY_GIT_COMMIT_AUTHOR_TIMESTAMP",
  "EARTHLY_GIT_COMMIT_TIMESTAMP",
  "EARTHLY_GIT_HASH",
  "EARTHLY_GIT_ORIGIN_URL",
  "EARTHLY_GIT_PROJECT_NAME",
  "EARTHLY_GIT_REFS",
  "EARTHLY_GIT_SHORT_HASH",
  "EARTHLY_GIT_TAG",
  "EARTHLY_LOCALLY",
  "EARTHLY_PUSH",
  "EARTHLY_SOURCE_DATE_EPOCH",
  "EARTHLY_TARGET",
  "EARTHLY_TARGET_NAME",
  "EARTHLY_TARGET_PROJECT",
  "EARTHLY_TARGET_PROJECT_NO_TAG",
  "EARTHLY_TARGET_TAG",
  "EARTHLY_TARGET_TAG_DOCKER",
  "EARTHLY_VERSION",
  "NATIVEARCH",
  "NATIVEOS",
  "NATIVEPLATFORM",
  "NATIVEVARIANT",
  "TARGETARCH",
  "TARGETOS",
  "TARGETPLATFORM",
  "TARGETVARIANT",
  "USERARCH",
  "USEROS",
  "USERPLATFORM",
  "USERVARIANT",
];

/// Predicate identifying reserved argument names.
pub trait BuiltinNames {
  fn is_builtin(&self, name: &str) -> bool;
}

impl<F> BuiltinNames for F
where
  F: Fn(&str) -> bool,
{
  fn is_builtin(&self, name: &str) -> bool {
    self(name)
  }
}

/// The build tool's own registry, backed by [`BUILTIN_ARGS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBuiltins;

impl BuiltinNames for DefaultBuiltins {
  fn is_builtin(&self, name: &str) -> bool {
    BUILTIN_ARGS.binary_search(&name).is_ok()
  }
}

/// The default registry extended with additional reserved names.
#[derive(Debug, Clone, Default)]
pub struct ExtraBuiltins {
  extra: HashSet<String>,
}

impl ExtraBuiltins {
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      extra: names.into_iter().map(Into::into).collect(),
    }
  }
}

impl BuiltinNames for ExtraBuiltins {
  fn is_builtin(&self, name: &str) -> bool {
    DefaultBuiltins.is_builtin(name) || self.extra.contains(name)
  }
}

/// Where an argument was supplied, which decides how reserved names are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardMode {
  /// Top-level command-line arguments: reserved names are always rejected.
  Strict,
  /// Arguments passed to a build step: a reserved name may be referenced
  /// without a value (inheriting it), but never given an explicit one.
  Overlay,
}

/// Apply the reserved-name policy for `mode` to a split token.
pub fn check(mode: GuardMode, token: &ArgToken, builtins: &impl BuiltinNames) -> Result<(), ArgError> {
  if !builtins.is_builtin(&token.name) {
    return Ok(());
  }
  match mode {
    GuardMode::Strict => Err(ArgError::BuiltinOnCommandLine(token.name.clone())),
    GuardMode::Overlay if token.has_value() => Err(ArgError::BuiltinOverride(token.name.clone())),
    GuardMode::Overlay => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::args::split;

  #[test]
  fn builtin_list_is_sorted() {
    // DefaultBuiltins relies on binary search.
    let mut sorted = BUILTIN_ARGS.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, BUILTIN_ARGS);
  }

  #[test]
  fn default_registry_recognizes_platform_args() {
    assert!(DefaultBuiltins.is_builtin("TARGETPLATFORM"));
    assert!(DefaultBuiltins.is_builtin("EARTHLY_TARGET_NAME"));
    assert!(!DefaultBuiltins.is_builtin("targetplatform"));
    assert!(!DefaultBuiltins.is_builtin("VERSION"));
  }

  #[test]
  fn extra_registry_extends_default() {
    let builtins = ExtraBuiltins::new(["CI_JOB_ID"]);
    assert!(builtins.is_builtin("CI_JOB_ID"));
    assert!(builtins.is_builtin("TARGETOS"));
    assert!(!builtins.is_builtin("VERSION"));
  }

  #[test]
  fn closures_act_as_registries() {
    let only_secret = |name: &str| name == "SECRET";
    assert!(only_secret.is_builtin("SECRET"));
    assert!(!only_secret.is_builtin("PUBLIC"));
  }

  #[test]
  fn strict_rejects_reserved_with_or_without_value() {
    for raw in ["TARGETOS", "TARGETOS=linux", "TARGETOS="] {
      let token = split(raw).unwrap();
      assert_eq!(
        check(GuardMode::Strict, &token, &DefaultBuiltins),
        Err(ArgError::BuiltinOnCommandLine("TARGETOS".to_string()))
      );
    }
  }

  #[test]
  fn overlay_rejects_only_explicit_values() {
    let with_value = split("TARGETOS=linux").unwrap();
    assert_eq!(
      check(GuardMode::Overlay, &with_value, &DefaultBuiltins),
      Err(ArgError::BuiltinOverride("TARGETOS".to_string()))
    );

    let without_value = split("TARGETOS").unwrap();
    assert_eq!(check(GuardMode::Overlay, &without_value, &DefaultBuiltins), Ok(()));
  }

  #[test]
  fn ordinary_names_pass_both_modes() {
    let token = split("VERSION=1").unwrap();
    assert_eq!(check(GuardMode::Strict, &token, &DefaultBuiltins), Ok(()));
    assert_eq!(check(GuardMode::Overlay, &token, &DefaultBuiltins), Ok(()));
  }
}
