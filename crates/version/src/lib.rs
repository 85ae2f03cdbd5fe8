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

//! Version values and build metadata for the apiserver.

#![allow(clippy::uninlined_format_args)]

mod build_info;
mod errors;
mod version;

pub use build_info::BuildInfo;
pub use build_info::DEFAULT_RELEASE_VERSION;
pub use errors::ParseVersionError;
pub use semver::BuildMetadata;
pub use semver::Prerelease;
pub use version::Version;
