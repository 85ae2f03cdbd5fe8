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

use apiserver_version::ParseVersionError;
use apiserver_version::Version;

/// Names one of the three versions of an effective version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionField {
    Binary,
    Emulation,
    MinCompatibility,
}

impl VersionField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VersionField::Binary => "binary version",
            VersionField::Emulation => "emulation version",
            VersionField::MinCompatibility => "minCompatibilityVersion",
        }
    }
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A violation found by [`validate_versions`](crate::validate_versions).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("emulation version {version} is not between [{min}, {max}]")]
    EmulationVersionOutOfRange {
        version: Version,
        min: Version,
        max: Version,
    },

    #[error("minCompatibilityVersion version {version} is not between [{min}, {max}]")]
    MinCompatibilityVersionOutOfRange {
        version: Version,
        min: Version,
        max: Version,
    },

    #[error("{0} is not set")]
    Unset(VersionField),
}

/// Error applying an [`EffectiveVersionConfig`](crate::EffectiveVersionConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {field}: {source}")]
    Parse {
        field: VersionField,
        source: ParseVersionError,
    },

    #[error("invalid effective version: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errs: &[ValidationError]) -> String {
    errs.iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
