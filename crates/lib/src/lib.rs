//! prebuild-lib: building native libraries for every platform with CMake
//!
//! This crate provides the pieces the `prebuild` CLI drives:
//! - `target`: the (platform, arch) descriptors and their CMake profiles
//! - `toolchain`: locating Android and emscripten toolchain files
//! - `cmake`: the generate and build/install command lines
//! - `execute`: the per-target pipeline and multi-target runs

pub mod cmake;
pub mod consts;
pub mod execute;
pub mod platform;
pub mod target;
pub mod toolchain;
pub mod util;
