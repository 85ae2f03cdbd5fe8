// Copyright 2024 The Apiserver Version Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Effective versions derived from build metadata.

use apiserver_version::BuildInfo;
use apiserver_version::DEFAULT_RELEASE_VERSION;
use apiserver_version::Version;
use log::info;

use crate::EffectiveVersionStore;

/// Builds the effective version of the binary described by `build`.
///
/// Falls back to [`default_release_effective_version`] when the build carries
/// no release: its version is empty or `0.0.x`, as in an unstamped dev build.
///
/// # Panics
///
/// Panics if `build.git_version` is set but not a valid version.
pub fn default_build_effective_version(build: &BuildInfo) -> EffectiveVersionStore {
    if build.git_version.trim().is_empty() {
        info!(
            "build carries no version, using default release {}",
            DEFAULT_RELEASE_VERSION
        );
        return default_release_effective_version(build);
    }

    let binary = Version::must_parse(&build.git_version).with_info(build.clone());

    if binary.major() == 0 && binary.minor() == 0 {
        info!(
            "build version {} carries no release, using default release {}",
            binary, DEFAULT_RELEASE_VERSION
        );
        return default_release_effective_version(build);
    }

    info!("effective binary version from build: {}", binary);
    EffectiveVersionStore::from_binary_version(binary)
}

/// Builds the effective version of the latest release, [`DEFAULT_RELEASE_VERSION`].
pub fn default_release_effective_version(build: &BuildInfo) -> EffectiveVersionStore {
    let binary = Version::must_parse(DEFAULT_RELEASE_VERSION).with_info(build.clone());
    info!("effective binary version from default release: {}", binary);
    EffectiveVersionStore::from_binary_version(binary)
}
