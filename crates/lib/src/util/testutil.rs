//! Test utilities for prebuild-lib.
//!
//! Cross-platform shell helpers and a stand-in for CMake that records what it
//! was asked to do.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::cmake::Invocation;
use crate::consts::INSTALL_DIR;
use crate::execute::{BuildError, CommandRunner, Outcome};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

pub fn invocation(program: &str, args: Vec<String>, cwd: &Path) -> Invocation {
  Invocation {
    program: program.to_string(),
    args,
    cwd: cwd.to_path_buf(),
    env: Default::default(),
  }
}

/// Simulated build tool.
///
/// On `--build` it writes `artifacts` (paths relative to the install
/// directory) under `<cwd>/install`; with no artifacts the install directory
/// is never created. Every call is recorded together with the
/// number of entries its working directory held when it started.
#[derive(Debug, Default)]
pub struct FakeCmake {
  pub artifacts: Vec<&'static str>,
  pub exit_code: i32,
  pub calls: Mutex<Vec<Invocation>>,
  pub cwd_entries: Mutex<Vec<usize>>,
}

impl FakeCmake {
  pub fn producing(artifacts: &[&'static str]) -> Self {
    Self {
      artifacts: artifacts.to_vec(),
      ..Self::default()
    }
  }

  pub fn failing(code: i32, artifacts: &[&'static str]) -> Self {
    Self {
      exit_code: code,
      ..Self::producing(artifacts)
    }
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.lock().unwrap().clone()
  }

  pub fn cwd_entries(&self) -> Vec<usize> {
    self.cwd_entries.lock().unwrap().clone()
  }
}

impl CommandRunner for FakeCmake {
  async fn run(&self, invocation: &Invocation) -> Result<Outcome, BuildError> {
    let entries = fs::read_dir(&invocation.cwd)?.count();
    self.cwd_entries.lock().unwrap().push(entries);
    self.calls.lock().unwrap().push(invocation.clone());

    if invocation.args.first().map(String::as_str) == Some("--build") && !self.artifacts.is_empty() {
      let install = invocation.cwd.join(INSTALL_DIR);
      fs::create_dir_all(&install)?;
      for artifact in &self.artifacts {
        let path = install.join(artifact);
        if let Some(parent) = path.parent() {
          fs::create_dir_all(parent)?;
        }
        fs::write(&path, artifact)?;
      }
    }

    Ok(Outcome {
      code: Some(self.exit_code),
    })
  }
}
