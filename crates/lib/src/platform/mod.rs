//! Host detection.
//!
//! The host decides which targets are built by default; it is never the
//! thing being built for.

pub mod arch;
pub mod os;

use std::fmt;

use arch::Arch;
use os::Os;

/// Host identifier combining architecture and OS (e.g., "x86_64-windows")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Host {
  pub arch: Arch,
  pub os: Os,
}

impl Host {
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current host at runtime
  ///
  /// Returns `None` if the OS or architecture is not recognized
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// Returns the host triple string (e.g., "aarch64-macos")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Host {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

/// Number of logical CPUs, used as the job count handed to the build tool.
pub fn cpu_count() -> usize {
  std::thread::available_parallelism().map(|p| p.get()).unwrap_or(1)
}
