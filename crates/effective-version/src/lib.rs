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

//! Effective version tracking for rolling upgrades.
//!
//! A running binary carries three versions:
//!
//! - the **binary version** of the build itself;
//! - the **emulation version**, whose externally visible behavior the binary
//!   mimics;
//! - the **minimum compatibility version**, the oldest minor release whose
//!   guarantees the binary still honors.
//!
//! Emulation may be at most one minor release behind the binary, and
//! compatibility is pinned to exactly one minor release behind. See
//! [`validate_versions`].

#![allow(clippy::uninlined_format_args)]

mod config;
mod defaults;
mod effective_version;
mod errors;
mod store;
mod validate;

pub use apiserver_version::BuildInfo;
pub use apiserver_version::Version;
pub use config::EffectiveVersionConfig;
pub use defaults::default_build_effective_version;
pub use defaults::default_release_effective_version;
pub use effective_version::EffectiveVersion;
pub use effective_version::EffectiveVersionSnapshot;
pub use effective_version::MutableEffectiveVersion;
pub use errors::ConfigError;
pub use errors::ValidationError;
pub use errors::VersionField;
pub use store::EffectiveVersionStore;
pub use validate::validate_versions;
