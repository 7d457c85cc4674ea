//! Implementation of the `prebuild build` command.
//!
//! Without `--target`, builds every default target of the host in order.
//! With `--target` and `--arch`, builds only that pair. The first failing
//! target ends the run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use prebuild_lib::consts::DEFAULT_CMAKE;
use prebuild_lib::execute::{BuildOptions, ProcessRunner, RunReport, plan_target, run_all, run_targets};
use prebuild_lib::platform::cpu_count;
use prebuild_lib::target::{TargetSpec, host_targets};
use prebuild_lib::toolchain::BuildEnv;

use crate::output::{OutputFormat, format_duration, print_info, print_json, print_step, print_success};

#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Target platform: windows, android, emscripten, macos or ios (default: the host's targets)
  #[arg(long, requires = "arch")]
  pub target: Option<String>,

  /// Target architecture: x86, x86_64, armv7, armv8 or wasm
  #[arg(long, requires = "target")]
  pub arch: Option<String>,

  /// Project root containing the top-level CMakeLists.txt
  #[arg(long, default_value = ".")]
  pub root: PathBuf,

  /// Parallel jobs for the build tool (default: logical CPU count)
  #[arg(short, long)]
  pub jobs: Option<usize>,

  /// CMake executable
  #[arg(long, default_value = DEFAULT_CMAKE)]
  pub cmake: String,

  /// Fail when CMake exits with a non-zero status
  #[arg(long)]
  pub strict: bool,

  /// Print the commands without running them or touching the filesystem
  #[arg(long)]
  pub dry_run: bool,

  /// Format of the --dry-run plan
  #[arg(long, value_enum, default_value_t)]
  pub output: OutputFormat,
}

impl Default for BuildArgs {
  fn default() -> Self {
    Self {
      target: None,
      arch: None,
      root: PathBuf::from("."),
      jobs: None,
      cmake: DEFAULT_CMAKE.to_string(),
      strict: false,
      dry_run: false,
      output: OutputFormat::Text,
    }
  }
}

/// Execute the build command.
pub fn cmd_build(args: &BuildArgs) -> Result<()> {
  let requested = match (&args.target, &args.arch) {
    (Some(target), Some(arch)) => Some(TargetSpec::parse(target, arch)?),
    _ => None,
  };

  let root = dunce::canonicalize(&args.root)
    .with_context(|| format!("Project root not found: {}", args.root.display()))?;
  let options = BuildOptions {
    root,
    jobs: args.jobs.unwrap_or_else(cpu_count),
    cmake: args.cmake.clone(),
    strict: args.strict,
    ..BuildOptions::default()
  };
  let env = BuildEnv::from_process();
  debug!(root = %options.root.display(), jobs = options.jobs, "build options");

  if args.dry_run {
    let specs = match requested {
      Some(spec) => vec![spec],
      None => host_targets(options.host).to_vec(),
    };
    return print_plans(&specs, &options, &env, args.output);
  }

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let report = rt
    .block_on(async {
      match requested {
        Some(spec) => run_targets(&[spec], &options, &env, &ProcessRunner).await,
        None => run_all(&options, &env, &ProcessRunner).await,
      }
    })
    .context("Build failed")?;

  print_report(&report);
  Ok(())
}

fn print_plans(specs: &[TargetSpec], options: &BuildOptions, env: &BuildEnv, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    let plans = specs
      .iter()
      .map(|spec| plan_target(spec, options, env))
      .collect::<Result<Vec<_>, _>>()?;
    return print_json(&plans);
  }

  if specs.is_empty() {
    print_info("Nothing to build for this host.");
    return Ok(());
  }

  for spec in specs {
    let plan = plan_target(spec, options, env)?;
    print_info(&format!("{} (in {})", spec, plan.build_dir.display()));
    for (name, value) in &plan.configure.env {
      print_step(&format!("{}={}", name, value));
    }
    print_step(&plan.configure.command_line());
    print_step(&plan.build.command_line());
    print_step(&format!("collect {} into {}", plan.install_dir.display(), plan.prebuilt_dir.display()));
  }
  Ok(())
}

fn print_report(report: &RunReport) {
  if report.is_empty() {
    print_info("Nothing to build for this host.");
    return;
  }

  for target in &report.targets {
    print_success(&format!(
      "{} built in {}",
      target.spec,
      format_duration(target.elapsed)
    ));
    for artifact in &target.artifacts {
      print_step(&artifact.display().to_string());
    }
  }
  println!();
  println!("Build complete!");
  println!("  Targets: {}", report.targets.len());
  println!("  Entries collected: {}", report.artifact_count());
}
