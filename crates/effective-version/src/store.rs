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

use std::fmt;
use std::sync::Arc;

use apiserver_version::ParseVersionError;
use apiserver_version::Version;
use arc_swap::ArcSwapOption;
use log::debug;

use crate::EffectiveVersion;
use crate::MutableEffectiveVersion;
use crate::ValidationError;
use crate::effective_version::fmt_versions;
use crate::validate_versions;

/// Lock-free holder of the binary, emulation and min-compatibility versions.
///
/// Each version lives in its own `ArcSwapOption` and is replaced by
/// publishing a new `Arc`, never mutated in place. Reads never block.
/// There is no atomicity across the three slots.
pub struct EffectiveVersionStore {
    binary_version: ArcSwapOption<Version>,

    /// Always `major.minor`. The binary's pre-release tag is added on read,
    /// so that a test build marked `alpha` keeps serving alpha APIs.
    emulation_version: ArcSwapOption<Version>,

    /// Always `major.minor`.
    min_compatibility_version: ArcSwapOption<Version>,
}

impl EffectiveVersionStore {
    /// Creates a store with all three versions unset.
    pub fn empty() -> Self {
        EffectiveVersionStore {
            binary_version: ArcSwapOption::empty(),
            emulation_version: ArcSwapOption::empty(),
            min_compatibility_version: ArcSwapOption::empty(),
        }
    }

    /// Creates a store seeded from a binary version string.
    ///
    /// An empty string yields an empty store.
    ///
    /// # Panics
    ///
    /// Panics if `binary_version` is not a valid version: the binary version
    /// is a startup invariant.
    pub fn new(binary_version: &str) -> Self {
        if binary_version.is_empty() {
            return Self::empty();
        }
        Self::from_binary_version(Version::must_parse(binary_version))
    }

    /// Like [`EffectiveVersionStore::new`] but returns parse errors.
    pub fn try_new(binary_version: &str) -> Result<Self, ParseVersionError> {
        if binary_version.is_empty() {
            return Ok(Self::empty());
        }
        let binary = Version::parse(binary_version)?;
        Ok(Self::from_binary_version(binary))
    }

    /// Seeds emulation with the binary version and min-compatibility with one
    /// minor release before it.
    pub fn from_binary_version(binary_version: Version) -> Self {
        let store = Self::empty();
        let compat = binary_version.subtract_minor(1);
        store.set(
            Some(binary_version.clone()),
            Some(binary_version),
            Some(compat),
        );
        store
    }
}

impl Default for EffectiveVersionStore {
    fn default() -> Self {
        Self::empty()
    }
}

fn major_minor(ver: Option<Version>) -> Option<Arc<Version>> {
    ver.map(|v| Arc::new(v.truncate_major_minor()))
}

impl EffectiveVersion for EffectiveVersionStore {
    fn binary_version(&self) -> Option<Arc<Version>> {
        self.binary_version.load_full()
    }

    fn emulation_version(&self) -> Option<Arc<Version>> {
        let ver = self.emulation_version.load_full()?;

        let binary = self.binary_version.load();
        match binary.as_deref() {
            Some(b) if !b.pre_release().is_empty() => {
                Some(Arc::new(ver.with_pre_release(b.pre_release().clone())))
            }
            _ => Some(ver),
        }
    }

    fn min_compatibility_version(&self) -> Option<Arc<Version>> {
        self.min_compatibility_version.load_full()
    }

    fn validate(&self) -> Vec<ValidationError> {
        let binary = self.binary_version.load();
        let emulation = self.emulation_version.load();
        let min_compatibility = self.min_compatibility_version.load();

        validate_versions(
            binary.as_deref(),
            emulation.as_deref(),
            min_compatibility.as_deref(),
        )
    }
}

impl MutableEffectiveVersion for EffectiveVersionStore {
    fn set(
        &self,
        binary_version: Option<Version>,
        emulation_version: Option<Version>,
        min_compatibility_version: Option<Version>,
    ) {
        debug!(
            "set effective version: binary: {:?}, emulation: {:?}, minCompatibility: {:?}",
            binary_version.as_ref().map(|v| v.to_string()),
            emulation_version.as_ref().map(|v| v.to_string()),
            min_compatibility_version.as_ref().map(|v| v.to_string()),
        );

        self.binary_version.store(binary_version.map(Arc::new));
        self.emulation_version.store(major_minor(emulation_version));
        self.min_compatibility_version
            .store(major_minor(min_compatibility_version));
    }

    fn set_emulation_version(&self, emulation_version: Version) {
        debug!("set emulation version: {}", emulation_version);
        self.emulation_version.store(major_minor(Some(emulation_version)));
    }

    fn set_min_compatibility_version(&self, min_compatibility_version: Version) {
        debug!("set minCompatibilityVersion: {}", min_compatibility_version);
        self.min_compatibility_version
            .store(major_minor(Some(min_compatibility_version)));
    }
}

impl fmt::Display for EffectiveVersionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_versions(
            f,
            self.binary_version().as_deref(),
            self.emulation_version().as_deref(),
            self.min_compatibility_version().as_deref(),
        )
    }
}

impl fmt::Debug for EffectiveVersionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveVersionStore")
            .field("binary_version", &self.binary_version())
            .field("emulation_version", &self.emulation_version())
            .field(
                "min_compatibility_version",
                &self.min_compatibility_version(),
            )
            .finish()
    }
}

impl PartialEq for EffectiveVersionStore {
    fn eq(&self, other: &Self) -> bool {
        self.equal_to(other)
    }
}

impl Eq for EffectiveVersionStore {}
