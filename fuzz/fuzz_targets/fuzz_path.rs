// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for resource path normalization and locator URI parsing

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use resx_core::location::{ArchiveUri, LocatorUri};
use resx_core::path::{canonicalize, normalize, strip_resource_prefix, ResourcePath};

#[derive(Arbitrary, Debug)]
struct Input {
    path: String,
    prefix: String,
}

fuzz_target!(|input: Input| {
    let normalized = normalize(&input.path);
    assert!(!normalized.starts_with('/'));
    assert!(!normalized.ends_with('/'));
    assert!(!normalized.contains("//"));
    assert_eq!(normalize(&normalized), normalized);

    let canonical = canonicalize(&input.path);
    assert!(!canonical.split('/').any(|segment| segment == "."));
    assert_eq!(canonicalize(&canonical), canonical);

    let stripped = strip_resource_prefix(&normalized, &input.prefix);
    assert!(!stripped.starts_with('/'));

    let resource = ResourcePath::new(&input.path);
    let _ = resource.extension();
    let _ = resource.base_name();
    let _ = resource.parent();
    let _ = resource.join(&input.prefix);

    let _ = LocatorUri::parse(&input.path);
    if let Ok(uri) = ArchiveUri::parse(&input.path) {
        let _ = ArchiveUri::parse(&uri.to_uri());
    }
});
