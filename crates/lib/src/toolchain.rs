//! Toolchain file resolution.
//!
//! Android and emscripten builds need a CMake toolchain file found through
//! the environment. Resolution reads a [`BuildEnv`] snapshot and returns the
//! toolchain path together with the variables the child process must see;
//! the process environment itself is never modified.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::{
  ANDROID_NDK_ROOT, EMSCRIPTEN_ROOT_PATH, EMSDK, HOMEBREW_BIN, HOMEBREW_EMSCRIPTEN_ROOT, PATH,
};
use crate::execute::BuildError;
use crate::platform::os::Os;
use crate::target::Toolchain;

/// Snapshot of the environment variables toolchain lookup may consult.
#[derive(Debug, Clone, Default)]
pub struct BuildEnv {
  vars: BTreeMap<String, String>,
}

impl BuildEnv {
  /// Capture the current process environment. Non UTF-8 entries are skipped.
  pub fn from_process() -> Self {
    Self::from_vars(
      std::env::vars_os().filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
    )
  }

  pub fn from_vars<I, K, V>(vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.vars.get(name).map(String::as_str)
  }
}

/// A located toolchain file and the environment overlay it requires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedToolchain {
  /// Value for `CMAKE_TOOLCHAIN_FILE`, forward-slash separated.
  pub file: Option<String>,
  /// Variables set on every child process of the target.
  pub env: BTreeMap<String, String>,
}

/// Resolve the toolchain of a target profile.
pub fn resolve(
  toolchain: Toolchain,
  host: Option<Os>,
  root: &Path,
  env: &BuildEnv,
) -> Result<ResolvedToolchain, BuildError> {
  let resolved = match toolchain {
    Toolchain::None => ResolvedToolchain::default(),
    Toolchain::AndroidNdk => android_ndk(env)?,
    Toolchain::IosProject => ResolvedToolchain {
      file: Some(format!("{}/../cmake/ios.toolchain.cmake", posix_path(root))),
      env: BTreeMap::new(),
    },
    Toolchain::Emscripten => emscripten(host, env, Path::new(HOMEBREW_EMSCRIPTEN_ROOT))?,
  };
  debug!(?toolchain, file = ?resolved.file, "resolved toolchain");
  Ok(resolved)
}

fn android_ndk(env: &BuildEnv) -> Result<ResolvedToolchain, BuildError> {
  let ndk = env.get(ANDROID_NDK_ROOT).ok_or(BuildError::MissingEnv(ANDROID_NDK_ROOT))?;
  Ok(ResolvedToolchain {
    file: Some(format!(
      "{}/build/cmake/android.toolchain.cmake",
      posix_path(Path::new(ndk))
    )),
    env: BTreeMap::new(),
  })
}

/// Locate the emscripten root.
///
/// Windows hosts use the SDK pointed to by `EMSDK`. Other hosts expect a
/// Homebrew install at `homebrew_root` and get `/usr/local/bin` appended to
/// `PATH`.
fn emscripten(host: Option<Os>, env: &BuildEnv, homebrew_root: &Path) -> Result<ResolvedToolchain, BuildError> {
  let mut overlay = BTreeMap::new();

  let root = if host == Some(Os::Windows) {
    match env.get(EMSDK).map(PathBuf::from) {
      Some(emsdk) if emsdk.exists() => emsdk.join("upstream").join("emscripten"),
      emsdk => {
        return Err(BuildError::ToolchainNotFound {
          path: emsdk,
          hint: "conan install emscripten",
        });
      }
    }
  } else {
    let path = match env.get(PATH) {
      Some(path) => format!("{path}:{HOMEBREW_BIN}"),
      None => HOMEBREW_BIN.to_string(),
    };
    overlay.insert(PATH.to_string(), path);
    if !homebrew_root.exists() {
      return Err(BuildError::ToolchainNotFound {
        path: Some(homebrew_root.to_path_buf()),
        hint: "brew install emscripten",
      });
    }
    homebrew_root.to_path_buf()
  };

  overlay.insert(EMSCRIPTEN_ROOT_PATH.to_string(), root.to_string_lossy().into_owned());
  Ok(ResolvedToolchain {
    file: Some(format!(
      "{}/cmake/Modules/Platform/Emscripten.cmake",
      posix_path(&root)
    )),
    env: overlay,
  })
}

/// Absolute form of `path` with `/` separators, as CMake expects.
///
/// Relative paths are taken from the directory `prebuild` was started in,
/// not the build directory the child runs in.
fn posix_path(path: &Path) -> String {
  let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
  absolute.to_string_lossy().replace('\\', "/")
}
