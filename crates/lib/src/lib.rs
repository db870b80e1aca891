//! buildvars-lib: build argument and variable resolution.
//!
//! This crate turns raw `NAME[=VALUE]` tokens into variable scopes:
//! - `args`: the resolvers for command-line args, build-step args and env pairs
//! - `builtin`: reserved argument names and the guard enforcing them
//! - `env`: environment lookups used for command-line fallback
//! - `scope`: `Scope`, `Collection` and active-binding lookup
//! - `shell`: detection of unguarded `$(...)` command substitution

pub mod args;
pub mod builtin;
pub mod env;
pub mod error;
pub mod scope;
pub mod shell;

pub use args::{parse_args, parse_command_line_args, parse_env_vars};
pub use error::ArgError;
pub use scope::{ActiveLookup, Binding, Collection, Scope};
pub use shell::contains_shell;
