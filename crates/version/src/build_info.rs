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

//! Metadata describing how and from what source this binary was built.
//!
//! Release builds override the defaults through compile-time environment
//! variables:
//!
//! - `APISERVER_GIT_VERSION`, e.g. `v1.31.2`
//! - `APISERVER_GIT_MAJOR` and `APISERVER_GIT_MINOR`
//! - `APISERVER_GIT_COMMIT` and `APISERVER_GIT_TREE_STATE`
//! - `APISERVER_BUILD_DATE` in RFC 3339 form
//! - `APISERVER_RUSTC_VERSION`

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// The latest release this source tree corresponds to.
///
/// Used as the binary version when the build metadata does not carry a
/// usable one, i.e. its major and minor are both 0.
pub const DEFAULT_RELEASE_VERSION: &str = "1.31";

const UNKNOWN_BUILD_DATE: &str = "1970-01-01T00:00:00Z";

/// Build metadata of a binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub major: String,
    pub minor: String,
    pub git_version: String,
    pub git_commit: String,
    pub git_tree_state: String,
    pub build_date: String,
    pub rustc_version: String,
    pub compiler: String,
    pub platform: String,
}

impl BuildInfo {
    /// Returns the metadata embedded into this build at compile time.
    pub fn current() -> Self {
        BuildInfo {
            major: option_env!("APISERVER_GIT_MAJOR")
                .unwrap_or(env!("CARGO_PKG_VERSION_MAJOR"))
                .to_string(),
            minor: option_env!("APISERVER_GIT_MINOR")
                .unwrap_or(env!("CARGO_PKG_VERSION_MINOR"))
                .to_string(),
            git_version: option_env!("APISERVER_GIT_VERSION")
                .unwrap_or(concat!("v", env!("CARGO_PKG_VERSION")))
                .to_string(),
            git_commit: option_env!("APISERVER_GIT_COMMIT")
                .unwrap_or_default()
                .to_string(),
            git_tree_state: option_env!("APISERVER_GIT_TREE_STATE")
                .unwrap_or_default()
                .to_string(),
            build_date: option_env!("APISERVER_BUILD_DATE")
                .unwrap_or(UNKNOWN_BUILD_DATE)
                .to_string(),
            rustc_version: option_env!("APISERVER_RUSTC_VERSION")
                .unwrap_or("unknown")
                .to_string(),
            compiler: "rustc".to_string(),
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }

    /// Returns a copy with only `git_version` replaced.
    pub fn with_git_version(mut self, git_version: impl ToString) -> Self {
        self.git_version = git_version.to_string();
        self
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.git_version)
    }
}
