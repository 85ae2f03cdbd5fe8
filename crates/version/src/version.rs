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

//! A comparable release version: `major.minor[.patch][-pre][+build]`.
//!
//! # Version Semantics
//!
//! Unlike a strict SemVer value, the patch component is optional: a version
//! written as `1.31` keeps two components and renders as `1.31`, while
//! comparing exactly like `1.31.0`.
//!
//! Ordering looks at `major`, `minor`, `patch` and then the pre-release tag,
//! using SemVer precedence for the tag (`1.31.0-alpha.1 < 1.31.0`).
//! Build metadata and attached [`BuildInfo`] never affect ordering or equality.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use semver::BuildMetadata;
use semver::Prerelease;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::BuildInfo;
use crate::ParseVersionError;

/// A release version with an optional patch component.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,

    /// Number of numeric components as written: 2 or 3.
    components: usize,

    pre: Prerelease,
    build: BuildMetadata,

    /// Metadata of the build this version describes, if any.
    info: Option<Arc<BuildInfo>>,
}

impl Version {
    /// Creates a full `major.minor.patch` version.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            components: 3,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
            info: None,
        }
    }

    /// Creates a two-component `major.minor` version.
    pub const fn major_minor(major: u64, minor: u64) -> Self {
        Version {
            major,
            minor,
            patch: 0,
            components: 2,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
            info: None,
        }
    }

    /// Parses a version string.
    ///
    /// Accepts an optional leading `v`, two or three numeric components,
    /// then an optional `-<pre-release>` and `+<build>` suffix. A pre-release
    /// is only accepted after a patch component.
    pub fn parse(s: &str) -> Result<Self, ParseVersionError> {
        let input = s.trim();
        if input.is_empty() {
            return Err(ParseVersionError::Empty);
        }

        let text = input.strip_prefix('v').unwrap_or(input);

        let (rest, build) = match text.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (text, None),
        };

        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let parts = core.split('.').collect::<Vec<_>>();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(ParseVersionError::ComponentCount {
                input: input.to_string(),
                count: parts.len(),
            });
        }

        let mut nums = [0u64; 3];
        for (i, part) in parts.iter().enumerate() {
            nums[i] = parse_component(input, part)?;
        }

        let pre = match pre {
            None => Prerelease::EMPTY,
            Some(_) if parts.len() < 3 => {
                return Err(ParseVersionError::InvalidPreRelease {
                    input: input.to_string(),
                    reason: "pre-release requires a patch component".to_string(),
                });
            }
            Some(p) => parse_pre_release(input, p)?,
        };

        let build = match build {
            None => BuildMetadata::EMPTY,
            Some(b) => parse_build_metadata(input, b)?,
        };

        Ok(Version {
            major: nums[0],
            minor: nums[1],
            patch: nums[2],
            components: parts.len(),
            pre,
            build,
            info: None,
        })
    }

    /// Parses a version string that is known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not a valid version.
    pub fn must_parse(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|e| panic!("Invalid version: {:?}: {}", s, e))
    }

    /// Returns the major version component.
    pub const fn major(&self) -> u64 {
        self.major
    }

    /// Returns the minor version component.
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    /// Returns the patch version component, 0 for a `major.minor` version.
    pub const fn patch(&self) -> u64 {
        self.patch
    }

    /// Returns the number of numeric components, 2 or 3.
    pub const fn components(&self) -> usize {
        self.components
    }

    pub fn pre_release(&self) -> &Prerelease {
        &self.pre
    }

    pub fn build_metadata(&self) -> &BuildMetadata {
        &self.build
    }

    /// Returns the build metadata attached with [`Version::with_info`].
    pub fn info(&self) -> Option<&BuildInfo> {
        self.info.as_deref()
    }

    /// Returns `major.(minor - n)` as a two-component version.
    ///
    /// The minor component saturates at 0.
    pub fn subtract_minor(&self, n: u64) -> Self {
        Version::major_minor(self.major, self.minor.saturating_sub(n))
    }

    /// Drops patch, pre-release, build metadata and build info.
    pub fn truncate_major_minor(&self) -> Self {
        Version::major_minor(self.major, self.minor)
    }

    /// Returns a three-component copy with the given patch.
    ///
    /// Pre-release, build metadata and build info are kept.
    pub fn with_patch(&self, patch: u64) -> Self {
        Version {
            patch,
            components: 3,
            ..self.clone()
        }
    }

    /// Returns a copy carrying `pre` as its pre-release tag.
    ///
    /// An empty tag returns the version unchanged; otherwise the result
    /// always has three components, since `1.31-alpha` is not a valid form.
    pub fn with_pre_release(&self, pre: Prerelease) -> Self {
        if pre.is_empty() {
            return self.clone();
        }
        Version {
            components: 3,
            pre,
            ..self.clone()
        }
    }

    pub fn with_build_metadata(&self, build: BuildMetadata) -> Self {
        Version {
            build,
            ..self.clone()
        }
    }

    /// Attaches the metadata of the build this version describes.
    pub fn with_info(&self, info: BuildInfo) -> Self {
        Version {
            info: Some(Arc::new(info)),
            ..self.clone()
        }
    }

    pub fn equal_to(&self, other: &Version) -> bool {
        self == other
    }

    pub fn greater_than(&self, other: &Version) -> bool {
        self > other
    }

    pub fn less_than(&self, other: &Version) -> bool {
        self < other
    }

    pub fn at_least(&self, min: &Version) -> bool {
        self >= min
    }

    /// Returns the numeric part as a tuple `(major, minor, patch)`.
    pub const fn as_tuple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

fn parse_component(input: &str, part: &str) -> Result<u64, ParseVersionError> {
    let invalid = |reason: &str| ParseVersionError::InvalidComponent {
        input: input.to_string(),
        component: part.to_string(),
        reason: reason.to_string(),
    };

    if part.is_empty() {
        return Err(invalid("empty component"));
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(invalid("leading zero"));
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("not a number"));
    }
    part.parse::<u64>().map_err(|e| invalid(&e.to_string()))
}

fn parse_pre_release(input: &str, pre: &str) -> Result<Prerelease, ParseVersionError> {
    if pre.is_empty() {
        return Err(ParseVersionError::InvalidPreRelease {
            input: input.to_string(),
            reason: "empty pre-release".to_string(),
        });
    }
    Prerelease::new(pre).map_err(|e| ParseVersionError::InvalidPreRelease {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

fn parse_build_metadata(input: &str, build: &str) -> Result<BuildMetadata, ParseVersionError> {
    if build.is_empty() {
        return Err(ParseVersionError::InvalidBuildMetadata {
            input: input.to_string(),
            reason: "empty build metadata".to_string(),
        });
    }
    BuildMetadata::new(build).map_err(|e| ParseVersionError::InvalidBuildMetadata {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.components > 2 {
            write!(f, ".{}", self.patch)?;
        }
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_tuple()
            .cmp(&other.as_tuple())
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

impl From<&semver::Version> for Version {
    fn from(v: &semver::Version) -> Self {
        Version {
            pre: v.pre.clone(),
            build: v.build.clone(),
            ..Version::new(v.major, v.minor, v.patch)
        }
    }
}

impl From<semver::Version> for Version {
    fn from(v: semver::Version) -> Self {
        Version::from(&v)
    }
}

impl From<&Version> for semver::Version {
    fn from(v: &Version) -> Self {
        semver::Version {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            pre: v.pre.clone(),
            build: v.build.clone(),
        }
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        let s = String::deserialize(deserializer)?;
        Version::parse(&s).map_err(serde::de::Error::custom)
    }
}
