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

//! Behavior of an effective version as seen through the public traits.

use std::sync::Arc;

use apiserver_effective_version::EffectiveVersion;
use apiserver_effective_version::EffectiveVersionStore;
use apiserver_effective_version::MutableEffectiveVersion;
use apiserver_effective_version::ValidationError;
use apiserver_effective_version::Version;

fn mm(v: &Version) -> Version {
    v.truncate_major_minor()
}

#[test]
fn test_new_seeds_emulation_and_compatibility() -> anyhow::Result<()> {
    for binary in ["1.31.2", "1.0.0", "1.1", "3.17.4+build.7", "v1.29.10"] {
        let ev = EffectiveVersionStore::try_new(binary)?;
        let b: Version = binary.parse()?;

        let emulation = ev.emulation_version().unwrap();
        let compat = ev.min_compatibility_version().unwrap();

        assert_eq!(*emulation, mm(&b), "{}", binary);
        assert_eq!(*compat, mm(&b).subtract_minor(1), "{}", binary);
    }
    Ok(())
}

#[test]
fn test_set_emulation_reattaches_binary_pre_release() -> anyhow::Result<()> {
    for binary in ["1.31.2", "1.31.0-alpha.3", "1.31.0-rc.0+abc"] {
        let ev = EffectiveVersionStore::try_new(binary)?;
        let b: Version = binary.parse()?;

        for e in ["1.30", "1.30.4", "1.29.1-beta.2", "2.0.0+meta"] {
            ev.set_emulation_version(e.parse()?);

            let e: Version = e.parse()?;
            let want = mm(&e).with_pre_release(b.pre_release().clone());

            let got = ev.emulation_version().unwrap();
            assert_eq!(got.to_string(), want.to_string(), "{} {}", binary, e);
        }
    }
    Ok(())
}

#[test]
fn test_validation_boundaries() -> anyhow::Result<()> {
    let cases: Vec<(&str, &str, usize)> = vec![
        ("1.31", "1.30", 0),
        ("1.30", "1.30", 0),
        ("1.29", "1.30", 1),
        ("1.32", "1.30", 1),
        ("1.31", "1.31", 1),
        ("1.31", "1.29", 1),
        ("1.29", "1.31", 2),
    ];

    for (emulation, compat, want) in cases {
        let ev = EffectiveVersionStore::new("1.31.2");
        ev.set_emulation_version(emulation.parse()?);
        ev.set_min_compatibility_version(compat.parse()?);

        let errs = ev.validate();
        assert_eq!(errs.len(), want, "{} {}: {:?}", emulation, compat, errs);
    }
    Ok(())
}

#[test]
fn test_both_validation_errors() -> anyhow::Result<()> {
    let ev = EffectiveVersionStore::new("1.31.0");
    ev.set_emulation_version("2.0".parse()?);
    ev.set_min_compatibility_version("1.31".parse()?);

    let errs = ev.validate();
    assert_eq!(errs.len(), 2);
    assert!(matches!(
        errs[0],
        ValidationError::EmulationVersionOutOfRange { .. }
    ));
    assert!(matches!(
        errs[1],
        ValidationError::MinCompatibilityVersionOutOfRange { .. }
    ));
    Ok(())
}

#[test]
fn test_bulk_set() -> anyhow::Result<()> {
    let ev = EffectiveVersionStore::empty();
    ev.set(
        Some("1.32.1".parse()?),
        Some("1.31.7".parse()?),
        Some("1.31.0".parse()?),
    );

    assert_eq!(
        ev.to_string(),
        "{BinaryVersion: 1.32.1, EmulationVersion: 1.31, MinCompatibilityVersion: 1.31}"
    );
    assert!(ev.validate().is_empty());

    ev.set(None, None, None);
    assert_eq!(ev.to_string(), "<nil>");
    Ok(())
}

#[test]
fn test_equality_across_implementations() -> anyhow::Result<()> {
    let a = EffectiveVersionStore::new("1.31.2");
    let b = EffectiveVersionStore::new("1.31.2");

    assert!(a.equal_to(&b));
    assert!(b.equal_to(&a));

    let snap = a.snapshot();
    assert!(snap.equal_to(&a));
    assert!(a.equal_to(&snap));

    b.set(
        Some("1.31.2".parse()?),
        Some("1.31".parse()?),
        Some("1.29".parse()?),
    );
    assert!(!a.equal_to(&b));
    Ok(())
}

#[test]
fn test_shared_handle() -> anyhow::Result<()> {
    let ev: Arc<dyn MutableEffectiveVersion> = Arc::new(EffectiveVersionStore::new("1.31.2"));
    let view: Arc<dyn MutableEffectiveVersion> = ev.clone();

    ev.set_emulation_version("1.30".parse()?);
    assert_eq!(view.emulation_version().unwrap().to_string(), "1.30");
    assert_eq!(
        view.to_string(),
        "{BinaryVersion: 1.31.2, EmulationVersion: 1.30, MinCompatibilityVersion: 1.30}"
    );
    Ok(())
}
