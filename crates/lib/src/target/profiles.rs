//! Per-target CMake configuration.
//!
//! Entries are matched top to bottom; an entry without an arch matches any
//! arch of its target. Adding a target means adding rows here.

use super::{Target, TargetArch, TargetSpec};

/// Where the CMake toolchain file for a target comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolchain {
  /// No toolchain file; the generator's native compiler is used.
  None,
  /// `$ANDROID_NDK_ROOT/build/cmake/android.toolchain.cmake`
  AndroidNdk,
  /// `<root>/../cmake/ios.toolchain.cmake`
  IosProject,
  /// `<emscripten root>/cmake/Modules/Platform/Emscripten.cmake`
  Emscripten,
}

/// Flags selecting generator, toolchain and platform defines for a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProfile {
  /// Value of `-A`, the generator platform.
  pub generator_platform: Option<&'static str>,
  /// Value of `-G`.
  pub generator: Option<&'static str>,
  pub toolchain: Toolchain,
  /// Extra `-D` defines, emitted after the toolchain file.
  pub defines: &'static [(&'static str, &'static str)],
  /// Forward the job count to MSBuild as `/p:CL_MPcount`.
  pub msbuild_parallel: bool,
}

struct Entry {
  target: Target,
  arch: Option<TargetArch>,
  profile: TargetProfile,
}

const ANDROID_ARMV7_DEFINES: &[(&str, &str)] = &[
  ("ANDROID_ABI", "armeabi-v7a"),
  ("ANDROID_PLATFORM", crate::consts::ANDROID_PLATFORM),
];

const ANDROID_ARM64_DEFINES: &[(&str, &str)] = &[
  ("ANDROID_ABI", "arm64-v8a"),
  ("ANDROID_PLATFORM", crate::consts::ANDROID_PLATFORM),
];

const PROFILES: &[Entry] = &[
  Entry {
    target: Target::Windows,
    arch: Some(TargetArch::X86),
    profile: TargetProfile {
      generator_platform: Some("Win32"),
      generator: None,
      toolchain: Toolchain::None,
      defines: &[],
      msbuild_parallel: true,
    },
  },
  Entry {
    target: Target::Windows,
    arch: None,
    profile: TargetProfile {
      generator_platform: Some("X64"),
      generator: None,
      toolchain: Toolchain::None,
      defines: &[],
      msbuild_parallel: true,
    },
  },
  Entry {
    target: Target::Android,
    arch: Some(TargetArch::Armv7),
    profile: TargetProfile {
      generator_platform: None,
      generator: Some("Ninja"),
      toolchain: Toolchain::AndroidNdk,
      defines: ANDROID_ARMV7_DEFINES,
      msbuild_parallel: false,
    },
  },
  Entry {
    target: Target::Android,
    arch: None,
    profile: TargetProfile {
      generator_platform: None,
      generator: Some("Ninja"),
      toolchain: Toolchain::AndroidNdk,
      defines: ANDROID_ARM64_DEFINES,
      msbuild_parallel: false,
    },
  },
  Entry {
    target: Target::Ios,
    arch: None,
    profile: TargetProfile {
      generator_platform: None,
      generator: Some("Xcode"),
      toolchain: Toolchain::IosProject,
      defines: &[("IOS_DEPLOYMENT_TARGET", "11.0"), ("PLATFORM", "OS64")],
      msbuild_parallel: false,
    },
  },
  Entry {
    target: Target::MacOs,
    arch: None,
    profile: TargetProfile {
      generator_platform: None,
      generator: Some("Xcode"),
      toolchain: Toolchain::None,
      defines: &[("OSX", "1")],
      msbuild_parallel: false,
    },
  },
  Entry {
    target: Target::Emscripten,
    arch: None,
    profile: TargetProfile {
      generator_platform: None,
      generator: Some("MinGW Makefiles"),
      toolchain: Toolchain::Emscripten,
      defines: &[],
      msbuild_parallel: false,
    },
  },
];

/// Look up the CMake profile for a descriptor.
pub fn profile(spec: &TargetSpec) -> Option<&'static TargetProfile> {
  PROFILES
    .iter()
    .find(|entry| entry.target == spec.target && entry.arch.is_none_or(|arch| arch == spec.arch))
    .map(|entry| &entry.profile)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lookup(target: Target, arch: TargetArch) -> &'static TargetProfile {
    profile(&TargetSpec::new(target, arch)).unwrap()
  }

  #[test]
  fn every_target_has_a_profile_for_every_arch() {
    let targets = [
      Target::Windows,
      Target::Android,
      Target::Emscripten,
      Target::MacOs,
      Target::Ios,
    ];
    let arches = [
      TargetArch::X86,
      TargetArch::X86_64,
      TargetArch::Armv7,
      TargetArch::Armv8,
      TargetArch::Wasm,
    ];
    for target in targets {
      for arch in arches {
        assert!(profile(&TargetSpec::new(target, arch)).is_some(), "{target}/{arch}");
      }
    }
  }

  #[test]
  fn windows_x86_selects_win32() {
    assert_eq!(lookup(Target::Windows, TargetArch::X86).generator_platform, Some("Win32"));
  }

  #[test]
  fn windows_other_arches_select_x64() {
    assert_eq!(lookup(Target::Windows, TargetArch::X86_64).generator_platform, Some("X64"));
    assert_eq!(lookup(Target::Windows, TargetArch::Armv8).generator_platform, Some("X64"));
  }

  #[test]
  fn android_abi_follows_arch() {
    let armv7 = lookup(Target::Android, TargetArch::Armv7);
    assert!(armv7.defines.contains(&("ANDROID_ABI", "armeabi-v7a")));
    assert!(armv7.defines.contains(&("ANDROID_PLATFORM", "android-21")));

    let armv8 = lookup(Target::Android, TargetArch::Armv8);
    assert!(armv8.defines.contains(&("ANDROID_ABI", "arm64-v8a")));
    assert!(armv8.defines.contains(&("ANDROID_PLATFORM", "android-21")));
  }

  #[test]
  fn only_windows_forwards_jobs_to_msbuild() {
    assert!(lookup(Target::Windows, TargetArch::X86_64).msbuild_parallel);
    assert!(!lookup(Target::MacOs, TargetArch::X86_64).msbuild_parallel);
    assert!(!lookup(Target::Emscripten, TargetArch::Wasm).msbuild_parallel);
  }
}
