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

/// Error returned when a version string can not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseVersionError {
    #[error("empty version string")]
    Empty,

    #[error("invalid version {input:?}: expected 2 or 3 components, got {count}")]
    ComponentCount { input: String, count: usize },

    #[error("invalid version {input:?}: component {component:?}: {reason}")]
    InvalidComponent {
        input: String,
        component: String,
        reason: String,
    },

    #[error("invalid version {input:?}: pre-release: {reason}")]
    InvalidPreRelease { input: String, reason: String },

    #[error("invalid version {input:?}: build metadata: {reason}")]
    InvalidBuildMetadata { input: String, reason: String },
}
