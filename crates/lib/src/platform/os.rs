use std::fmt;

/// Host operating systems the orchestrator knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    Self::from_name(std::env::consts::OS)
  }

  /// Map a `std::env::consts::OS` style name to an `Os`
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "macos",
      Self::Windows => "windows",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_name_maps_known_hosts() {
    assert_eq!(Os::from_name("windows"), Some(Os::Windows));
    assert_eq!(Os::from_name("macos"), Some(Os::MacOs));
    assert_eq!(Os::from_name("linux"), Some(Os::Linux));
  }

  #[test]
  fn unknown_host_is_none() {
    assert_eq!(Os::from_name("freebsd"), None);
  }

  #[test]
  fn current_matches_compile_target() {
    assert_eq!(Os::current(), Os::from_name(std::env::consts::OS));
  }
}
