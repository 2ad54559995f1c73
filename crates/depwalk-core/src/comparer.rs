//! Version ordering under configurable comparison semantics.
//!
//! Ordering rules, applied in sequence until one decides:
//! - `major`, `minor`, `patch` compare numerically
//! - the legacy fourth component (skipped in `Strict` mode): a version that
//!   has one sorts after a version that does not
//! - release labels (skipped in `VersionOnly` mode): a prerelease sorts before
//!   the release; label lists compare position by position, numeric labels
//!   numerically and before any non-numeric label, text labels ignoring case
//! - build metadata, ignoring case (`Default` mode only)

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::version::Version;

/// Which parts of a version take part in comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionComparison {
    /// Everything, including build metadata.
    #[default]
    Default,
    /// SemVer 2.0 precedence: no legacy component, no metadata.
    Strict,
    /// Everything except build metadata.
    IgnoreMetadata,
    /// Numeric components only, release labels and metadata ignored.
    VersionOnly,
}

/// A stateless comparison strategy for [`Version`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionComparer {
    mode: VersionComparison,
}

impl VersionComparer {
    pub const DEFAULT: Self = Self::new(VersionComparison::Default);
    pub const STRICT: Self = Self::new(VersionComparison::Strict);
    pub const IGNORE_METADATA: Self = Self::new(VersionComparison::IgnoreMetadata);
    pub const VERSION_ONLY: Self = Self::new(VersionComparison::VersionOnly);

    pub const fn new(mode: VersionComparison) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> VersionComparison {
        self.mode
    }

    pub fn compare(&self, x: &Version, y: &Version) -> Ordering {
        let ord = (x.major(), x.minor(), x.patch()).cmp(&(y.major(), y.minor(), y.patch()));
        if ord != Ordering::Equal {
            return ord;
        }

        if self.mode != VersionComparison::Strict {
            let ord = compare_revision(x.revision(), y.revision());
            if ord != Ordering::Equal {
                return ord;
            }
        }

        if self.mode == VersionComparison::VersionOnly {
            return Ordering::Equal;
        }

        let ord = match (x.is_prerelease(), y.is_prerelease()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => compare_release_labels(x.release_labels(), y.release_labels()),
            (false, false) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }

        if self.mode == VersionComparison::Default {
            return cmp_ignore_case(x.metadata().unwrap_or(""), y.metadata().unwrap_or(""));
        }

        Ordering::Equal
    }

    pub fn equals(&self, x: &Version, y: &Version) -> bool {
        self.compare(x, y) == Ordering::Equal
    }

    /// Canonical text for `version` under this mode: two versions compare
    /// equal exactly when their keys are equal.
    pub fn key(&self, version: &Version) -> String {
        let mut key = format!("{}.{}.{}", version.major(), version.minor(), version.patch());

        if self.mode != VersionComparison::Strict {
            if let Some(revision) = version.revision() {
                key.push_str(&format!(".{revision}"));
            }
        }

        if self.mode == VersionComparison::VersionOnly {
            return key;
        }

        if version.is_prerelease() {
            let labels: Vec<String> = version
                .release_labels()
                .iter()
                .map(|label| canonical_label(label))
                .collect();
            key.push('-');
            key.push_str(&labels.join("."));
        }

        if self.mode == VersionComparison::Default {
            if let Some(metadata) = version.metadata() {
                key.push('+');
                key.push_str(&metadata.to_ascii_lowercase());
            }
        }

        key
    }

    /// Hash `version` consistently with [`equals`](Self::equals).
    pub fn hash<H: Hasher>(&self, version: &Version, state: &mut H) {
        self.key(version).hash(state);
    }
}

fn compare_revision(x: Option<u64>, y: Option<u64>) -> Ordering {
    match (x, y) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn compare_release_labels(x: &[String], y: &[String]) -> Ordering {
    let mut a = x.iter();
    let mut b = y.iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = compare_label(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_label(x: &str, y: &str) -> Ordering {
    match (is_numeric(x), is_numeric(y)) {
        (true, true) => compare_numeric(x, y),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => cmp_ignore_case(x, y),
    }
}

fn is_numeric(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

// Digit strings of any length, so no overflow on absurd labels.
fn compare_numeric(x: &str, y: &str) -> Ordering {
    let x = strip_leading_zeros(x);
    let y = strip_leading_zeros(y);
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

fn strip_leading_zeros(digits: &str) -> &str {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0"
    } else {
        stripped
    }
}

fn canonical_label(label: &str) -> String {
    if is_numeric(label) {
        strip_leading_zeros(label).to_string()
    } else {
        label.to_ascii_lowercase()
    }
}

fn cmp_ignore_case(x: &str, y: &str) -> Ordering {
    x.chars()
        .map(|c| c.to_ascii_lowercase())
        .cmp(y.chars().map(|c| c.to_ascii_lowercase()))
}
