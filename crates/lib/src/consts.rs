//! Fixed names, paths and values shared across the crate.

pub const APP_NAME: &str = "prebuild";

/// Scratch tree, recreated for every target build.
pub const BUILD_DIR: &str = "build";
/// Final artifact tree.
pub const PREBUILT_DIR: &str = "prebuilt";
/// Install prefix CMake writes into, relative to the build directory.
pub const INSTALL_DIR: &str = "install";

pub const DEFAULT_CMAKE: &str = "cmake";
pub const BUILD_TYPE: &str = "Release";
pub const ANDROID_PLATFORM: &str = "android-21";

// Environment variables
pub const ANDROID_NDK_ROOT: &str = "ANDROID_NDK_ROOT";
pub const EMSDK: &str = "EMSDK";
pub const EMSCRIPTEN_ROOT_PATH: &str = "EMSCRIPTEN_ROOT_PATH";
pub const PATH: &str = "PATH";

/// Homebrew install location of emscripten on non-Windows hosts.
pub const HOMEBREW_EMSCRIPTEN_ROOT: &str = "/usr/local/opt/emscripten/libexec";
pub const HOMEBREW_BIN: &str = "/usr/local/bin";
