mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use buildvars_lib::builtin::ExtraBuiltins;

use crate::output::{OutputFormat, print_error};

/// bvars - resolve build args and variables
#[derive(Parser)]
#[command(name = "bvars")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  /// Additional reserved arg names, on top of the built-in ones
  #[arg(long, global = true, env = "BVARS_RESERVED", value_delimiter = ',')]
  reserved: Vec<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve command-line build args (missing values come from the environment)
  Resolve {
    /// Args of the form NAME or NAME=VALUE
    args: Vec<String>,
  },

  /// Resolve build-step args (missing values are inherited from active variables)
  BuildArgs {
    /// Args of the form NAME or NAME=VALUE
    args: Vec<String>,

    /// An active variable of the enclosing context, as NAME=VALUE
    #[arg(short, long = "active", value_name = "NAME=VALUE")]
    active: Vec<String>,

    /// Also treat the process environment as active variables
    #[arg(long)]
    inherit_env: bool,
  },

  /// Report whether values contain an unguarded $(...) command substitution
  CheckShell {
    /// Values to scan
    #[arg(required = true)]
    values: Vec<String>,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let builtins = ExtraBuiltins::new(cli.reserved.iter().filter(|n| !n.is_empty()).cloned());

  let result = match cli.command {
    Commands::Resolve { args } => cmd::cmd_resolve(&args, &builtins, cli.output).map(|_| true),
    Commands::BuildArgs {
      args,
      active,
      inherit_env,
    } => cmd::cmd_build_args(&args, &active, inherit_env, &builtins, cli.output).map(|_| true),
    Commands::CheckShell { values } => cmd::cmd_check_shell(&values, cli.output).map(|found| !found),
  };

  match result {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::FAILURE,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
