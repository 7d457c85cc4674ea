//! Types for target builds.
//!
//! This module defines the error type, the options every build runs with,
//! and the plans and reports produced along the way.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::cmake::Invocation;
use crate::consts::DEFAULT_CMAKE;
use crate::platform::cpu_count;
use crate::platform::os::Os;
use crate::target::TargetSpec;

/// Errors that can occur while building a target.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The (target, arch) pair has no CMake configuration.
  #[error("Configuration not supported: platform = {target}, arch = {arch}")]
  Unsupported { target: String, arch: String },

  /// A variable needed to locate a toolchain is not set.
  #[error("environment variable {0} is not set")]
  MissingEnv(&'static str),

  /// The emscripten SDK could not be located.
  #[error("EMSDK is not found, please run \"{hint}\"")]
  ToolchainNotFound {
    path: Option<PathBuf>,
    hint: &'static str,
  },

  /// An existing build or output directory could not be removed.
  #[error("failed to remove {}: {source}", .path.display())]
  CleanFailed {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The build did not produce an install directory.
  #[error("install directory not found: {}", .0.display())]
  InstallDirMissing(PathBuf),

  /// The build tool could not be started.
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  /// The build tool exited unsuccessfully and strict mode is on.
  #[error("command failed with exit code {code:?}: {command}")]
  CommandFailed { command: String, code: Option<i32> },

  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

/// Settings shared by every target build of a run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  /// Project root holding the top-level `CMakeLists.txt`.
  pub root: PathBuf,
  /// Job count passed to `cmake --build --parallel`.
  pub jobs: usize,
  /// Build tool executable.
  pub cmake: String,
  /// Treat a non-zero exit status of the build tool as an error.
  pub strict: bool,
  /// Host the run happens on; selects default targets and toolchain lookup.
  pub host: Option<Os>,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      root: PathBuf::from("."),
      jobs: cpu_count(),
      cmake: DEFAULT_CMAKE.to_string(),
      strict: false,
      host: Os::current(),
    }
  }
}

/// Everything needed to build one target, computed before anything runs.
#[derive(Debug, Clone, Serialize)]
pub struct TargetPlan {
  pub spec: TargetSpec,
  pub build_dir: PathBuf,
  pub install_dir: PathBuf,
  pub prebuilt_dir: PathBuf,
  /// Project generation step.
  pub configure: Invocation,
  /// Build and install step.
  pub build: Invocation,
}

/// Result of building a single target.
#[derive(Debug, Clone)]
pub struct TargetReport {
  pub spec: TargetSpec,
  pub prebuilt_dir: PathBuf,
  /// Top-level entries moved into `prebuilt_dir`.
  pub artifacts: Vec<PathBuf>,
  pub elapsed: Duration,
}

/// Result of a multi-target run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
  pub targets: Vec<TargetReport>,
}

impl RunReport {
  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }

  pub fn artifact_count(&self) -> usize {
    self.targets.iter().map(|t| t.artifacts.len()).sum()
  }
}
