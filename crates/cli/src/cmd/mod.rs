mod build_args;
mod check_shell;
mod resolve;

pub use build_args::cmd_build_args;
pub use check_shell::cmd_check_shell;
pub use resolve::cmd_resolve;
