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
use log::info;
use serde::Deserialize;
use serde::Serialize;

use crate::ConfigError;
use crate::MutableEffectiveVersion;
use crate::VersionField;

/// User supplied overrides of an effective version.
///
/// Versions are given as strings such as `"1.30"`; only major and minor
/// are kept when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectiveVersionConfig {
    /// The version whose behavior the binary should emulate.
    pub emulation_version: Option<String>,

    pub min_compatibility_version: Option<String>,
}

impl EffectiveVersionConfig {
    /// Stores the configured versions into `target`.
    ///
    /// All values are parsed before anything is stored: on error `target`
    /// is left unchanged.
    pub fn apply(&self, target: &dyn MutableEffectiveVersion) -> Result<(), ConfigError> {
        let emulation = parse(VersionField::Emulation, self.emulation_version.as_deref())?;
        let min_compatibility = parse(
            VersionField::MinCompatibility,
            self.min_compatibility_version.as_deref(),
        )?;

        if let Some(v) = emulation {
            info!("emulation version configured: {}", v);
            target.set_emulation_version(v);
        }
        if let Some(v) = min_compatibility {
            info!("minCompatibilityVersion configured: {}", v);
            target.set_min_compatibility_version(v);
        }
        Ok(())
    }

    /// Applies the configuration then validates the result.
    ///
    /// On validation failure `target` keeps the applied versions.
    pub fn apply_and_validate(
        &self,
        target: &dyn MutableEffectiveVersion,
    ) -> Result<(), ConfigError> {
        self.apply(target)?;

        let errs = target.validate();
        if !errs.is_empty() {
            return Err(ConfigError::Invalid(errs));
        }
        Ok(())
    }
}

fn parse(field: VersionField, s: Option<&str>) -> Result<Option<Version>, ConfigError> {
    let Some(s) = s else {
        return Ok(None);
    };
    let v = Version::parse(s).map_err(|source| ConfigError::Parse { field, source })?;
    Ok(Some(v))
}
