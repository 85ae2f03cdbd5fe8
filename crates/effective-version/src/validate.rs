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

use apiserver_version::Version;
use log::debug;

use crate::ValidationError;
use crate::VersionField;

/// Checks emulation and compatibility versions against the binary version.
///
/// Only major and minor take part: for a binary at `X.Y.*`,
///
/// - emulation must lie in `[X.(Y-1), X.Y]`;
/// - min-compatibility must be exactly `X.(Y-1)`.
///
/// Every violation is reported; an unset version is reported as
/// [`ValidationError::Unset`] and skips the checks that need it.
pub fn validate_versions(
    binary: Option<&Version>,
    emulation: Option<&Version>,
    min_compatibility: Option<&Version>,
) -> Vec<ValidationError> {
    let mut errs = vec![];

    if binary.is_none() {
        errs.push(ValidationError::Unset(VersionField::Binary));
    }
    if emulation.is_none() {
        errs.push(ValidationError::Unset(VersionField::Emulation));
    }
    if min_compatibility.is_none() {
        errs.push(ValidationError::Unset(VersionField::MinCompatibility));
    }

    let Some(binary) = binary else {
        return errs;
    };

    // Patch and pre-release of the binary do not move the window.
    let binary = Version::new(binary.major(), binary.minor(), 0);

    if let Some(emulation) = emulation {
        let max = binary.clone();
        let min = binary.subtract_minor(1);
        let ver = emulation.truncate_major_minor();

        if ver.greater_than(&max) || ver.less_than(&min) {
            debug!("emulation version {} out of [{}, {}]", emulation, min, max);
            errs.push(ValidationError::EmulationVersionOutOfRange {
                version: emulation.clone(),
                min,
                max,
            });
        }
    }

    if let Some(min_compatibility) = min_compatibility {
        let max = binary.subtract_minor(1);
        let min = binary.subtract_minor(1);
        let ver = min_compatibility.truncate_major_minor();

        if ver.greater_than(&max) || ver.less_than(&min) {
            debug!(
                "minCompatibilityVersion {} out of [{}, {}]",
                min_compatibility, min, max
            );
            errs.push(ValidationError::MinCompatibilityVersionOutOfRange {
                version: min_compatibility.clone(),
                min,
                max,
            });
        }
    }

    errs
}
