//! Confirmation before destructive commands.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::{Result, bail};

/// Ask whether `path` may be removed. `force` skips the question.
pub fn confirm_removal(path: &Path, force: bool) -> Result<bool> {
  if force {
    return Ok(true);
  }

  let stdin = io::stdin();
  let mut stderr = io::stderr();
  if !stdin.is_terminal() || !stderr.is_terminal() {
    bail!(
      "Refusing to remove {} without confirmation in non-interactive mode. Use --force to proceed.",
      path.display()
    );
  }

  write!(stderr, "Remove {} and everything in it? [y/N] ", path.display())?;
  stderr.flush()?;

  let mut answer = String::new();
  stdin.lock().read_line(&mut answer)?;
  Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
  matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_yes_in_any_case() {
    assert!(is_yes("y\n"));
    assert!(is_yes("YES"));
    assert!(is_yes("  Yes  "));
  }

  #[test]
  fn anything_else_is_no() {
    assert!(!is_yes(""));
    assert!(!is_yes("n"));
    assert!(!is_yes("yep"));
  }

  #[test]
  fn force_skips_prompt() {
    assert!(confirm_removal(Path::new("/tmp/prebuilt"), true).unwrap());
  }
}
