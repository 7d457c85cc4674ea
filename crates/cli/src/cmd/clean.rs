//! Implementation of the `prebuild clean` command.
//!
//! Removes the scratch build tree, and with `--all` the collected prebuilt
//! libraries as well.

use std::path::Path;

use anyhow::{Context, Result};

use prebuild_lib::consts::{BUILD_DIR, PREBUILT_DIR};
use prebuild_lib::util::fs::{Removal, remove_path};

use crate::output::{print_info, print_success};
use crate::prompts::confirm_removal;

pub fn cmd_clean(root: &Path, all: bool, force: bool) -> Result<()> {
  let root = dunce::canonicalize(root).with_context(|| format!("Project root not found: {}", root.display()))?;

  remove(&root.join(BUILD_DIR))?;

  if all {
    let prebuilt = root.join(PREBUILT_DIR);
    if !prebuilt.exists() {
      print_info(&format!("Nothing to remove at {}", prebuilt.display()));
    } else if confirm_removal(&prebuilt, force)? {
      remove(&prebuilt)?;
    } else {
      print_info("Kept prebuilt libraries.");
    }
  }

  Ok(())
}

fn remove(path: &Path) -> Result<()> {
  match remove_path(path).with_context(|| format!("Failed to remove {}", path.display()))? {
    Removal::Removed => print_success(&format!("Removed {}", path.display())),
    Removal::Absent => print_info(&format!("Nothing to remove at {}", path.display())),
  }
  Ok(())
}
