use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

use depwalk_core::comparer::{VersionComparer, VersionComparison};
use depwalk_core::version::Version;

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

fn hash_of(comparer: &VersionComparer, version: &Version) -> u64 {
    let mut hasher = DefaultHasher::new();
    comparer.hash(version, &mut hasher);
    hasher.finish()
}

const ALL: [VersionComparer; 4] = [
    VersionComparer::DEFAULT,
    VersionComparer::STRICT,
    VersionComparer::IGNORE_METADATA,
    VersionComparer::VERSION_ONLY,
];

#[test]
fn test_numeric_components_decide_first() {
    for c in ALL {
        assert_eq!(c.compare(&v("1.2.3"), &v("1.10.0")), Ordering::Less);
        assert_eq!(c.compare(&v("2.0"), &v("1.99.99")), Ordering::Greater);
    }
}

#[test]
fn test_strict_ignores_legacy_component() {
    assert!(VersionComparer::STRICT.equals(&v("1.0.0.5"), &v("1.0.0")));
    assert!(!VersionComparer::DEFAULT.equals(&v("1.0.0.5"), &v("1.0.0")));
    assert!(!VersionComparer::VERSION_ONLY.equals(&v("1.0.0.5"), &v("1.0.0.4")));
}

#[test]
fn test_version_only_ignores_labels_and_metadata() {
    let c = VersionComparer::VERSION_ONLY;
    assert!(c.equals(&v("1.0.0-beta+x"), &v("1.0.0")));
    assert_eq!(c.key(&v("1.0.0-beta+x")), "1.0.0");
}

#[test]
fn test_metadata_only_counts_in_default_mode() {
    let a = v("1.0.0+a");
    let b = v("1.0.0+b");
    assert_eq!(VersionComparer::DEFAULT.compare(&a, &b), Ordering::Less);
    assert!(VersionComparer::IGNORE_METADATA.equals(&a, &b));
    assert!(VersionComparer::STRICT.equals(&a, &b));
}

#[test]
fn test_absent_metadata_sorts_first() {
    assert_eq!(
        VersionComparer::DEFAULT.compare(&v("1.0.0"), &v("1.0.0+0")),
        Ordering::Less
    );
}

#[test]
fn test_release_label_rules() {
    let c = VersionComparer::IGNORE_METADATA;
    assert_eq!(c.compare(&v("1.0.0-alpha"), &v("1.0.0-beta")), Ordering::Less);
    assert_eq!(c.compare(&v("1.0.0-ALPHA"), &v("1.0.0-alpha")), Ordering::Equal);
    assert_eq!(c.compare(&v("1.0.0-2"), &v("1.0.0-10")), Ordering::Less);
    assert_eq!(c.compare(&v("1.0.0-99"), &v("1.0.0-a")), Ordering::Less);
    assert_eq!(c.compare(&v("1.0.0-rc"), &v("1.0.0-rc.1")), Ordering::Less);
    assert_eq!(c.compare(&v("1.0.0-rc.1"), &v("1.0.0")), Ordering::Less);
}

#[test]
fn test_equal_versions_hash_equal_per_mode() {
    let pairs = [
        ("1.2.3", "0001.000002.03"),
        ("1.2.3-Beta.01", "1.2.3-beta.1"),
        ("1.2.3+XYZ", "1.2.3+xyz"),
    ];
    for c in ALL {
        for (a, b) in pairs {
            let (a, b) = (v(a), v(b));
            if c.equals(&a, &b) {
                assert_eq!(hash_of(&c, &a), hash_of(&c, &b), "{a} vs {b} in {:?}", c.mode());
                assert_eq!(c.key(&a), c.key(&b));
            }
        }
    }
}

#[test]
fn test_normalized_text_preserves_ordering() {
    let texts = ["1.0", "1.0.1-beta", "1.0.0.3", "2.1-rc.2+sha", "0.9"];
    for c in ALL {
        for x in texts {
            for y in texts {
                let (a, b) = (v(x), v(y));
                let na = v(&a.to_normalized_string());
                let nb = v(&b.to_normalized_string());
                assert_eq!(c.compare(&a, &b), c.compare(&na, &nb));
            }
        }
    }
}

#[test]
fn test_comparison_mode_serde_names() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        mode: VersionComparison,
    }
    let w: Wrapper = toml::from_str(r#"mode = "version-only""#).unwrap();
    assert_eq!(w.mode, VersionComparison::VersionOnly);
    assert_eq!(VersionComparison::default(), VersionComparison::Default);
}
