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

use std::thread;

use apiserver_effective_version::EffectiveVersion;
use apiserver_effective_version::EffectiveVersionStore;
use apiserver_effective_version::MutableEffectiveVersion;
use apiserver_effective_version::Version;

/// Readers never observe a torn or unnormalized value while a writer flips
/// the emulation version between two settings.
#[test]
fn test_concurrent_readers_and_writer() -> anyhow::Result<()> {
    let ev = EffectiveVersionStore::new("1.31.2");
    let a: Version = "1.30.5".parse()?;
    let b: Version = "1.31.9".parse()?;

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..2000 {
                let v = if i % 2 == 0 { a.clone() } else { b.clone() };
                ev.set_emulation_version(v);
            }
        });

        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..2000 {
                    let got = ev.emulation_version().unwrap().to_string();
                    assert!(got == "1.30" || got == "1.31", "unexpected: {}", got);

                    assert_eq!(ev.binary_version().unwrap().to_string(), "1.31.2");
                    assert!(ev.validate().is_empty());
                }
            });
        }
    });

    let last = ev.emulation_version().unwrap();
    assert_eq!(last.to_string(), "1.31");
    Ok(())
}

/// Each field is stored independently; concurrent bulk sets still leave
/// every field holding one of the written values.
#[test]
fn test_concurrent_bulk_set() -> anyhow::Result<()> {
    let ev = EffectiveVersionStore::empty();

    thread::scope(|s| {
        for minor in [30u64, 31, 32] {
            let ev = &ev;
            s.spawn(move || {
                for _ in 0..500 {
                    ev.set(
                        Some(Version::new(1, minor, 1)),
                        Some(Version::new(1, minor, 1)),
                        Some(Version::major_minor(1, minor - 1)),
                    );
                }
            });
        }
    });

    for v in [
        ev.binary_version(),
        ev.emulation_version(),
        ev.min_compatibility_version(),
    ] {
        let v = v.unwrap();
        assert_eq!(v.major(), 1);
        assert!((29..=32).contains(&v.minor()), "{}", v);
    }
    Ok(())
}
