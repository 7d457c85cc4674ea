mod cmd;
mod output;
mod prompts;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use prebuild_lib::execute::BuildError;

use cmd::{BuildArgs, cmd_build, cmd_clean, cmd_info, cmd_targets};
use output::{OutputFormat, print_error};

/// Exit status when the emscripten SDK cannot be located.
const EXIT_TOOLCHAIN_NOT_FOUND: u8 = 2;

/// prebuild - build native libraries for every platform with CMake
#[derive(Parser)]
#[command(name = "prebuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Defaults to `build` for the host's targets
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure, build and collect targets into prebuilt/
  Build(BuildArgs),

  /// List the targets built by default on this host
  Targets {
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Show host information
  Info,

  /// Remove the build tree
  Clean {
    /// Project root containing build/ and prebuilt/
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Also remove prebuilt/
    #[arg(long)]
    all: bool,

    /// Skip confirmation
    #[arg(short, long)]
    force: bool,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::builder().with_default_directive(level.into()).from_env_lossy())
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli.command) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      exit_code(&err)
    }
  }
}

fn run(command: Option<Commands>) -> Result<()> {
  match command.unwrap_or_else(|| Commands::Build(BuildArgs::default())) {
    Commands::Build(args) => cmd_build(&args),
    Commands::Targets { output } => cmd_targets(output),
    Commands::Info => {
      cmd_info();
      Ok(())
    }
    Commands::Clean { root, all, force } => cmd_clean(&root, all, force),
  }
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
  match err.chain().find_map(|e| e.downcast_ref::<BuildError>()) {
    Some(BuildError::ToolchainNotFound { .. }) => ExitCode::from(EXIT_TOOLCHAIN_NOT_FOUND),
    _ => ExitCode::FAILURE,
  }
}
