//! CMake command lines.
//!
//! Builds the two invocations every target goes through: project generation
//! and build-plus-install. Each [`Invocation`] carries its own working
//! directory and environment overlay.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::BUILD_TYPE;
use crate::target::TargetProfile;
use crate::toolchain::ResolvedToolchain;

/// A fully specified child process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: PathBuf,
  /// Variables added to the inherited environment.
  pub env: BTreeMap<String, String>,
}

impl Invocation {
  /// Render as a single shell-like line. Arguments containing whitespace are
  /// double quoted.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .map(quote)
      .collect::<Vec<_>>()
      .join(" ")
  }
}

fn quote(arg: &str) -> Cow<'_, str> {
  if arg.contains(char::is_whitespace) {
    Cow::Owned(format!("\"{arg}\""))
  } else {
    Cow::Borrowed(arg)
  }
}

fn define(name: &str, value: &str) -> String {
  format!("-D{name}={value}")
}

/// `cmake <root> -DCMAKE_BUILD_TYPE=Release [-A ..] [-G ..] [-DCMAKE_TOOLCHAIN_FILE=..] [-D..]`
pub fn configure_invocation(
  program: &str,
  root: &Path,
  profile: &TargetProfile,
  toolchain: &ResolvedToolchain,
  build_dir: &Path,
) -> Invocation {
  let mut args = vec![root.to_string_lossy().into_owned(), define("CMAKE_BUILD_TYPE", BUILD_TYPE)];

  if let Some(platform) = profile.generator_platform {
    args.push("-A".to_string());
    args.push(platform.to_string());
  }
  if let Some(generator) = profile.generator {
    args.push("-G".to_string());
    args.push(generator.to_string());
  }
  if let Some(file) = &toolchain.file {
    args.push(define("CMAKE_TOOLCHAIN_FILE", file));
  }
  args.extend(profile.defines.iter().map(|(name, value)| define(name, value)));

  Invocation {
    program: program.to_string(),
    args,
    cwd: build_dir.to_path_buf(),
    env: toolchain.env.clone(),
  }
}

/// `cmake --build . --config Release --target install --parallel <jobs> [-- /p:CL_MPcount=<jobs>]`
pub fn build_invocation(
  program: &str,
  profile: &TargetProfile,
  jobs: usize,
  build_dir: &Path,
  env: &BTreeMap<String, String>,
) -> Invocation {
  let jobs = jobs.to_string();
  let mut args: Vec<String> = [
    "--build",
    ".",
    "--config",
    BUILD_TYPE,
    "--target",
    "install",
    "--parallel",
    jobs.as_str(),
  ]
  .into_iter()
  .map(String::from)
  .collect();

  if profile.msbuild_parallel {
    args.push("--".to_string());
    args.push(format!("/p:CL_MPcount={jobs}"));
  }

  Invocation {
    program: program.to_string(),
    args,
    cwd: build_dir.to_path_buf(),
    env: env.clone(),
  }
}
