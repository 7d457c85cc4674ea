//! Target build execution.
//!
//! This module provides the main entry points for building targets. Targets
//! are built one at a time, in order; the first failure ends the run.
//!
//! Per target:
//! 1. Plan: look up the profile, resolve the toolchain, build both invocations
//! 2. Reset the build directory
//! 3. Generate the project, then build and install it
//! 4. Reset the prebuilt directory and move the install tree into it

pub mod process;
pub mod types;

use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::cmake::{self, Invocation};
use crate::target::{TargetSpec, host_targets, profile};
use crate::toolchain::{self, BuildEnv};
use crate::util::fs::{move_entries, reset_dir};

pub use process::{CommandRunner, Outcome, ProcessRunner};
pub use types::{BuildError, BuildOptions, RunReport, TargetPlan, TargetReport};

/// Compute the directories and invocations for a target without touching
/// the filesystem.
///
/// Fails before any side effect when the configuration is unsupported or the
/// toolchain cannot be located.
pub fn plan_target(spec: &TargetSpec, options: &BuildOptions, env: &BuildEnv) -> Result<TargetPlan, BuildError> {
  let profile = profile(spec).ok_or_else(|| BuildError::Unsupported {
    target: spec.target.to_string(),
    arch: spec.arch.to_string(),
  })?;
  let toolchain = toolchain::resolve(profile.toolchain, options.host, &options.root, env)?;

  let build_dir = spec.build_dir(&options.root);
  let configure = cmake::configure_invocation(&options.cmake, &options.root, profile, &toolchain, &build_dir);
  let build = cmake::build_invocation(&options.cmake, profile, options.jobs, &build_dir, &toolchain.env);

  Ok(TargetPlan {
    spec: *spec,
    install_dir: spec.install_dir(&options.root),
    prebuilt_dir: spec.prebuilt_dir(&options.root),
    build_dir,
    configure,
    build,
  })
}

/// Build one target and collect its install tree into the prebuilt directory.
pub async fn build_one<R: CommandRunner>(
  spec: &TargetSpec,
  options: &BuildOptions,
  env: &BuildEnv,
  runner: &R,
) -> Result<TargetReport, BuildError> {
  let started = Instant::now();
  let plan = plan_target(spec, options, env)?;
  info!(platform = %spec.target, arch = %spec.arch, dir = %plan.build_dir.display(), "building target");

  reset_dir(&plan.build_dir)?;
  run_step(runner, &plan.configure, options.strict).await?;
  run_step(runner, &plan.build, options.strict).await?;

  reset_dir(&plan.prebuilt_dir)?;
  if !plan.install_dir.is_dir() {
    return Err(BuildError::InstallDirMissing(plan.install_dir));
  }
  let artifacts = move_entries(&plan.install_dir, &plan.prebuilt_dir)?;
  debug!(count = artifacts.len(), dest = %plan.prebuilt_dir.display(), "moved install entries");

  Ok(TargetReport {
    spec: *spec,
    prebuilt_dir: plan.prebuilt_dir,
    artifacts,
    elapsed: started.elapsed(),
  })
}

/// Build the given targets in order, stopping at the first failure.
pub async fn run_targets<R: CommandRunner>(
  specs: &[TargetSpec],
  options: &BuildOptions,
  env: &BuildEnv,
  runner: &R,
) -> Result<RunReport, BuildError> {
  let mut report = RunReport::default();
  for (index, spec) in specs.iter().enumerate() {
    debug!(index, total = specs.len(), "starting target {}", spec);
    match build_one(spec, options, env, runner).await {
      Ok(target) => report.targets.push(target),
      Err(e) => {
        error!(platform = %spec.target, arch = %spec.arch, error = %e, "target build failed");
        return Err(e);
      }
    }
  }
  Ok(report)
}

/// Build every default target of the configured host.
///
/// A host without default targets is not an error; the run is empty.
pub async fn run_all<R: CommandRunner>(
  options: &BuildOptions,
  env: &BuildEnv,
  runner: &R,
) -> Result<RunReport, BuildError> {
  let specs = host_targets(options.host);
  if specs.is_empty() {
    let host = options.host.map_or("unknown", |os| os.as_str());
    warn!(host, "no targets are configured for this host");
    return Ok(RunReport::default());
  }
  info!(count = specs.len(), "building host targets");
  run_targets(specs, options, env, runner).await
}

async fn run_step<R: CommandRunner>(runner: &R, invocation: &Invocation, strict: bool) -> Result<(), BuildError> {
  let outcome = runner.run(invocation).await?;
  if outcome.success() {
    return Ok(());
  }

  let command = invocation.command_line();
  if strict {
    return Err(BuildError::CommandFailed {
      command,
      code: outcome.code,
    });
  }
  warn!(cmd = %command, code = ?outcome.code, "command exited unsuccessfully, continuing");
  Ok(())
}
