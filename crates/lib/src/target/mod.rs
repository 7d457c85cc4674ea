//! Build targets.
//!
//! A target is the (platform, architecture) pair a prebuilt library is
//! produced for. The set is closed; the host decides which pairs are built
//! when none is requested explicitly.

mod profiles;

pub use profiles::{TargetProfile, Toolchain, profile};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::consts::{BUILD_DIR, INSTALL_DIR, PREBUILT_DIR};
use crate::execute::BuildError;
use crate::platform::os::Os;

/// Platform a library is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
  Windows,
  Android,
  Emscripten,
  MacOs,
  Ios,
}

impl Target {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::Android => "android",
      Self::Emscripten => "emscripten",
      Self::MacOs => "macos",
      Self::Ios => "ios",
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Target {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "windows" => Ok(Self::Windows),
      "android" => Ok(Self::Android),
      "emscripten" => Ok(Self::Emscripten),
      "macos" => Ok(Self::MacOs),
      "ios" => Ok(Self::Ios),
      _ => Err(()),
    }
  }
}

/// Architecture a library is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetArch {
  X86,
  X86_64,
  Armv7,
  Armv8,
  Wasm,
}

impl TargetArch {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86 => "x86",
      Self::X86_64 => "x86_64",
      Self::Armv7 => "armv7",
      Self::Armv8 => "armv8",
      Self::Wasm => "wasm",
    }
  }
}

impl fmt::Display for TargetArch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for TargetArch {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "x86" => Ok(Self::X86),
      "x86_64" => Ok(Self::X86_64),
      "armv7" => Ok(Self::Armv7),
      "armv8" => Ok(Self::Armv8),
      "wasm" => Ok(Self::Wasm),
      _ => Err(()),
    }
  }
}

/// A (target, arch) descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TargetSpec {
  pub target: Target,
  pub arch: TargetArch,
}

impl TargetSpec {
  pub const fn new(target: Target, arch: TargetArch) -> Self {
    Self { target, arch }
  }

  /// Parse a descriptor from user-supplied names.
  ///
  /// Either name being unknown makes the whole configuration unsupported.
  pub fn parse(target: &str, arch: &str) -> Result<Self, BuildError> {
    match (target.parse::<Target>(), arch.parse::<TargetArch>()) {
      (Ok(target), Ok(arch)) => Ok(Self { target, arch }),
      _ => Err(BuildError::Unsupported {
        target: target.to_string(),
        arch: arch.to_string(),
      }),
    }
  }

  /// `<root>/build/<target>/<arch>`
  pub fn build_dir(&self, root: &Path) -> PathBuf {
    root.join(BUILD_DIR).join(self.target.as_str()).join(self.arch.as_str())
  }

  /// `<root>/build/<target>/<arch>/install`
  pub fn install_dir(&self, root: &Path) -> PathBuf {
    self.build_dir(root).join(INSTALL_DIR)
  }

  /// `<root>/prebuilt/<target>/<arch>`
  pub fn prebuilt_dir(&self, root: &Path) -> PathBuf {
    root.join(PREBUILT_DIR).join(self.target.as_str()).join(self.arch.as_str())
  }
}

impl fmt::Display for TargetSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.target, self.arch)
  }
}

const WINDOWS_HOST_TARGETS: &[TargetSpec] = &[
  TargetSpec::new(Target::Windows, TargetArch::X86_64),
  TargetSpec::new(Target::Android, TargetArch::Armv7),
  TargetSpec::new(Target::Android, TargetArch::Armv8),
  TargetSpec::new(Target::Emscripten, TargetArch::Wasm),
];

const MACOS_HOST_TARGETS: &[TargetSpec] = &[
  TargetSpec::new(Target::MacOs, TargetArch::X86_64),
  TargetSpec::new(Target::Ios, TargetArch::Armv8),
];

/// Targets built by default on the given host, in build order.
///
/// Hosts other than Windows and macOS have no default targets.
pub fn host_targets(host: Option<Os>) -> &'static [TargetSpec] {
  match host {
    Some(Os::Windows) => WINDOWS_HOST_TARGETS,
    Some(Os::MacOs) => MACOS_HOST_TARGETS,
    Some(Os::Linux) | None => &[],
  }
}
