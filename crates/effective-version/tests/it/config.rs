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

use apiserver_effective_version::BuildInfo;
use apiserver_effective_version::ConfigError;
use apiserver_effective_version::EffectiveVersionConfig;
use apiserver_effective_version::VersionField;
use apiserver_effective_version::default_build_effective_version;

#[test]
fn test_config_from_json() -> anyhow::Result<()> {
    let conf: EffectiveVersionConfig = serde_json::from_str(r#"{"emulation_version": "1.30"}"#)?;
    assert_eq!(conf.emulation_version.as_deref(), Some("1.30"));
    assert_eq!(conf.min_compatibility_version, None);

    let conf: EffectiveVersionConfig = serde_json::from_str("{}")?;
    assert_eq!(conf, EffectiveVersionConfig::default());
    Ok(())
}

#[test]
fn test_config_on_build_version() -> anyhow::Result<()> {
    let build = BuildInfo::default().with_git_version("v1.31.4");
    let ev = default_build_effective_version(&build);

    let conf: EffectiveVersionConfig = serde_json::from_str(
        r#"{"emulation_version": "v1.30", "min_compatibility_version": "1.30"}"#,
    )?;
    conf.apply_and_validate(&ev)?;

    assert_eq!(
        ev.to_string(),
        "{BinaryVersion: 1.31.4, EmulationVersion: 1.30, MinCompatibilityVersion: 1.30}"
    );
    Ok(())
}

#[test]
fn test_config_errors() -> anyhow::Result<()> {
    let ev = default_build_effective_version(&BuildInfo::default().with_git_version("v1.31.4"));

    let conf: EffectiveVersionConfig = serde_json::from_str(r#"{"emulation_version": "latest"}"#)?;
    let err = conf.apply(&ev).unwrap_err();
    assert!(
        matches!(err, ConfigError::Parse {
            field: VersionField::Emulation,
            ..
        }),
        "{}",
        err
    );

    let conf: EffectiveVersionConfig =
        serde_json::from_str(r#"{"min_compatibility_version": "1.31"}"#)?;
    let err = conf.apply_and_validate(&ev).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid effective version: minCompatibilityVersion version 1.31 is not between [1.30, 1.30]"
    );
    Ok(())
}
