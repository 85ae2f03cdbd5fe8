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

use apiserver_version::Version;

use crate::ValidationError;
use crate::validate_versions;

/// Rendered in place of an unset version.
pub(crate) const NIL: &str = "<nil>";

/// Read access to the binary, emulation and min-compatibility versions.
///
/// Each accessor is independently atomic: two calls made without external
/// synchronization may observe versions from different writes.
pub trait EffectiveVersion: fmt::Display + Send + Sync {
    fn binary_version(&self) -> Option<Arc<Version>>;

    /// The emulation version, carrying the binary's pre-release tag if any.
    fn emulation_version(&self) -> Option<Arc<Version>>;

    fn min_compatibility_version(&self) -> Option<Arc<Version>>;

    /// Checks the versions against the binary version's minor window.
    fn validate(&self) -> Vec<ValidationError>;

    /// Compares all three versions pairwise.
    ///
    /// Two unset versions are equal; an unset and a set version are not.
    fn equal_to(&self, other: &dyn EffectiveVersion) -> bool {
        self.binary_version() == other.binary_version()
            && self.emulation_version() == other.emulation_version()
            && self.min_compatibility_version() == other.min_compatibility_version()
    }

    /// Reads all three versions into a plain value.
    fn snapshot(&self) -> EffectiveVersionSnapshot {
        EffectiveVersionSnapshot {
            binary_version: self.binary_version(),
            emulation_version: self.emulation_version(),
            min_compatibility_version: self.min_compatibility_version(),
        }
    }
}

/// An [`EffectiveVersion`] that can be updated in place.
///
/// Setters only normalize: emulation and min-compatibility versions are
/// truncated to `major.minor`. Nothing is validated on write.
pub trait MutableEffectiveVersion: EffectiveVersion {
    /// Replaces all three versions; each is stored independently.
    fn set(
        &self,
        binary_version: Option<Version>,
        emulation_version: Option<Version>,
        min_compatibility_version: Option<Version>,
    );

    fn set_emulation_version(&self, emulation_version: Version);

    fn set_min_compatibility_version(&self, min_compatibility_version: Version);
}

/// The three versions as read at one point, one accessor at a time.
///
/// Built from independent loads, so it is not guaranteed to reflect a single
/// [`MutableEffectiveVersion::set`] call under concurrent writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveVersionSnapshot {
    pub binary_version: Option<Arc<Version>>,
    pub emulation_version: Option<Arc<Version>>,
    pub min_compatibility_version: Option<Arc<Version>>,
}

impl EffectiveVersion for EffectiveVersionSnapshot {
    fn binary_version(&self) -> Option<Arc<Version>> {
        self.binary_version.clone()
    }

    fn emulation_version(&self) -> Option<Arc<Version>> {
        self.emulation_version.clone()
    }

    fn min_compatibility_version(&self) -> Option<Arc<Version>> {
        self.min_compatibility_version.clone()
    }

    fn validate(&self) -> Vec<ValidationError> {
        validate_versions(
            self.binary_version.as_deref(),
            self.emulation_version.as_deref(),
            self.min_compatibility_version.as_deref(),
        )
    }
}

impl fmt::Display for EffectiveVersionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_versions(
            f,
            self.binary_version.as_deref(),
            self.emulation_version.as_deref(),
            self.min_compatibility_version.as_deref(),
        )
    }
}

/// Renders `{BinaryVersion: .., EmulationVersion: .., MinCompatibilityVersion: ..}`,
/// or `<nil>` if none is set.
pub(crate) fn fmt_versions(
    f: &mut fmt::Formatter<'_>,
    binary: Option<&Version>,
    emulation: Option<&Version>,
    min_compatibility: Option<&Version>,
) -> fmt::Result {
    if binary.is_none() && emulation.is_none() && min_compatibility.is_none() {
        return f.write_str(NIL);
    }

    write!(
        f,
        "{{BinaryVersion: {}, EmulationVersion: {}, MinCompatibilityVersion: {}}}",
        OrNil(binary),
        OrNil(emulation),
        OrNil(min_compatibility)
    )
}

struct OrNil<'a>(Option<&'a Version>);

impl fmt::Display for OrNil<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => f.write_str(NIL),
        }
    }
}
