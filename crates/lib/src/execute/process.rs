//! Running the build tool.
//!
//! Children inherit the standard streams, so the build tool's own output is
//! what the user sees. Only the exit status comes back.

use std::future::Future;

use tokio::process::Command;
use tracing::{debug, info};

use crate::cmake::Invocation;
use crate::execute::BuildError;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
  /// Exit code, `None` when terminated by a signal.
  pub code: Option<i32>,
}

impl Outcome {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Executes invocations. Implemented by [`ProcessRunner`] and by test doubles.
pub trait CommandRunner {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<Outcome, BuildError>> + Send;
}

/// Spawns real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
  async fn run(&self, invocation: &Invocation) -> Result<Outcome, BuildError> {
    info!(cmd = %invocation.command_line(), "executing command");
    debug!(cwd = %invocation.cwd.display(), env = ?invocation.env, "spawning process");

    let status = Command::new(&invocation.program)
      .args(&invocation.args)
      .current_dir(&invocation.cwd)
      .envs(&invocation.env)
      .status()
      .await
      .map_err(|source| BuildError::Spawn {
        program: invocation.program.clone(),
        source,
      })?;

    Ok(Outcome { code: status.code() })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::{invocation, shell_cmd, touch_file};
  use tempfile::TempDir;

  #[tokio::test]
  async fn reports_exit_code() {
    let temp = TempDir::new().unwrap();
    let (program, args) = shell_cmd("exit 3");

    let outcome = ProcessRunner.run(&invocation(program, args, temp.path())).await.unwrap();

    assert_eq!(outcome.code, Some(3));
    assert!(!outcome.success());
  }

  #[tokio::test]
  async fn runs_in_working_directory() {
    let temp = TempDir::new().unwrap();
    let (program, args) = touch_file("cwd_marker");

    let outcome = ProcessRunner.run(&invocation(program, args, temp.path())).await.unwrap();

    assert!(outcome.success());
    assert!(temp.path().join("cwd_marker").exists());
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn applies_env_overlay() {
    let temp = TempDir::new().unwrap();
    let (program, args) = shell_cmd(r#"test "$EMSCRIPTEN_ROOT_PATH" = "/em""#);
    let mut inv = invocation(program, args, temp.path());
    inv.env = std::collections::BTreeMap::from([("EMSCRIPTEN_ROOT_PATH".to_string(), "/em".to_string())]);

    let outcome = ProcessRunner.run(&inv).await.unwrap();

    assert!(outcome.success());
  }

  #[tokio::test]
  async fn missing_program_is_spawn_error() {
    let temp = TempDir::new().unwrap();
    let inv = invocation("definitely-not-a-real-cmake", Vec::new(), temp.path());

    let err = ProcessRunner.run(&inv).await.unwrap_err();

    assert!(matches!(err, BuildError::Spawn { ref program, .. } if program == "definitely-not-a-real-cmake"));
  }
}
