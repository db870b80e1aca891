//! Detection of shell command substitution in argument values.
//!
//! A value such as `$(git rev-parse HEAD)` has to be run through a shell
//! before it can be used, while `\$(...)` and `'$(...)'` are literal text.
//! [`contains_shell`] tells the two apart without evaluating anything.

/// Scanner state threaded through a single left-to-right pass.
#[derive(Debug, Default)]
struct ScanState {
  /// The previous character was an unescaped backslash.
  escaped: bool,
  /// Inside an unclosed `'...'` span.
  single_quoted: bool,
  /// The previous character, if it may start a `$(` pair.
  last: Option<char>,
}

impl ScanState {
  /// Feed one character; returns `true` when it completes an unguarded `$(`.
  fn step(&mut self, c: char) -> bool {
    if self.escaped {
      self.escaped = false;
      self.last = None;
      return false;
    }
    match c {
      '\\' => {
        self.escaped = true;
        self.last = None;
        false
      }
      '\'' => {
        self.single_quoted = !self.single_quoted;
        self.last = None;
        false
      }
      '(' if self.last == Some('$') && !self.single_quoted => true,
      _ => {
        self.last = Some(c);
        false
      }
    }
  }
}

/// Returns `true` if `s` contains a `$(` that a shell would evaluate.
///
/// A `$` or `(` escaped by a backslash does not count, nor does a pair inside
/// single quotes. Double quotes are not special.
///
/// ```
/// use buildvars_lib::shell::contains_shell;
///
/// assert!(contains_shell("echo $(ls)"));
/// assert!(!contains_shell(r"echo \$(ls)"));
/// assert!(!contains_shell("echo '$(ls)'"));
/// assert!(contains_shell("echo '$(ls)' $(pwd)"));
/// ```
pub fn contains_shell(s: &str) -> bool {
  let mut state = ScanState::default();
  s.chars().any(|c| state.step(c))
}
