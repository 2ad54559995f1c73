//! Version ranges.
//!
//! Accepted forms:
//! - `1.0` : `1.0 ≤ x`
//! - `(,1.0]` : `x ≤ 1.0`
//! - `(,1.0)` : `x < 1.0`
//! - `[1.0]` : `x == 1.0`
//! - `(1.0,)` : `1.0 < x`
//! - `(1.0, 2.0)` : `1.0 < x < 2.0`
//! - `[1.0, 2.0]` : `1.0 ≤ x ≤ 2.0`
//!
//! Bare integers inside brackets expand to `n.0` (`[1,2]` is `[1.0, 2.0]`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use depwalk_util::errors::{DepwalkError, DepwalkResult};

use crate::comparer::VersionComparer;
use crate::version::Version;

/// An immutable pair of optional version bounds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionRange {
    min: Option<Version>,
    min_inclusive: bool,
    max: Option<Version>,
    max_inclusive: bool,
}

impl VersionRange {
    pub fn new(
        min: Option<Version>,
        min_inclusive: bool,
        max: Option<Version>,
        max_inclusive: bool,
    ) -> Self {
        Self {
            min,
            min_inclusive,
            max,
            max_inclusive,
        }
    }

    /// Matches every version. Has no textual form of its own.
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches `version` and nothing else.
    pub fn exact(version: Version) -> Self {
        Self::new(Some(version.clone()), true, Some(version), true)
    }

    /// `version ≤ x`, the meaning of a bare version string.
    pub fn at_least(version: Version) -> Self {
        Self::new(Some(version), true, None, false)
    }

    pub fn parse(text: &str) -> DepwalkResult<Self> {
        let invalid = || DepwalkError::InvalidRangeString {
            text: text.to_string(),
        };
        let value = text.trim();

        if let Ok(version) = Version::parse(value) {
            return Ok(Self::at_least(version));
        }

        if value.len() < 3 {
            return Err(invalid());
        }

        let min_inclusive = match value.as_bytes()[0] {
            b'[' => true,
            b'(' => false,
            _ => return Err(invalid()),
        };
        let max_inclusive = match value.as_bytes()[value.len() - 1] {
            b']' => true,
            b')' => false,
            _ => return Err(invalid()),
        };

        let inner = &value[1..value.len() - 1];
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() > 2 || parts.iter().all(|p| p.is_empty()) {
            return Err(invalid());
        }

        // A single value is used for both bounds.
        let min_text = parts[0];
        let max_text = parts.get(1).copied().unwrap_or(min_text);

        let min = parse_bound(min_text).ok_or_else(invalid)?;
        let max = parse_bound(max_text).ok_or_else(invalid)?;

        Ok(Self::new(min, min_inclusive, max, max_inclusive))
    }

    pub fn min(&self) -> Option<&Version> {
        self.min.as_ref()
    }

    pub fn min_inclusive(&self) -> bool {
        self.min_inclusive
    }

    pub fn max(&self) -> Option<&Version> {
        self.max.as_ref()
    }

    pub fn max_inclusive(&self) -> bool {
        self.max_inclusive
    }

    /// No bounds at all.
    pub fn is_floating(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains_prerelease_bound(&self) -> bool {
        self.min.as_ref().is_some_and(Version::is_prerelease)
            || self.max.as_ref().is_some_and(Version::is_prerelease)
    }

    /// Check `version` against the bounds, ignoring build metadata.
    pub fn satisfies(&self, version: &Version) -> bool {
        self.satisfies_with(version, &VersionComparer::IGNORE_METADATA)
    }

    pub fn satisfies_with(&self, version: &Version, comparer: &VersionComparer) -> bool {
        if let Some(ref min) = self.min {
            let cmp = comparer.compare(version, min);
            if self.min_inclusive {
                if cmp == Ordering::Less {
                    return false;
                }
            } else if cmp != Ordering::Greater {
                return false;
            }
        }
        if let Some(ref max) = self.max {
            let cmp = comparer.compare(version, max);
            if self.max_inclusive {
                if cmp == Ordering::Greater {
                    return false;
                }
            } else if cmp != Ordering::Less {
                return false;
            }
        }
        true
    }

    fn is_exact(&self) -> bool {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => self.min_inclusive && self.max_inclusive && min == max,
            _ => false,
        }
    }

    /// Full bracket form with normalized version text, e.g. `[1.0.0, )`.
    pub fn to_normalized_string(&self) -> String {
        let min = self
            .min
            .as_ref()
            .map(Version::to_normalized_string)
            .unwrap_or_default();
        let max = self
            .max
            .as_ref()
            .map(Version::to_normalized_string)
            .unwrap_or_default();
        format!(
            "{}{min}, {max}{}",
            if self.min_inclusive { '[' } else { '(' },
            if self.max_inclusive { ']' } else { ')' },
        )
    }

    /// Human readable form used in dependency display and error messages:
    /// `(= 1.0)`, `(≥ 1.0)`, `(> 1.0 && < 2.0)`. Empty when unbounded.
    pub fn pretty_print(&self) -> String {
        if self.is_exact() {
            if let Some(ref min) = self.min {
                return format!("(= {min})");
            }
        }

        let mut parts = Vec::with_capacity(2);
        if let Some(ref min) = self.min {
            let op = if self.min_inclusive { "≥" } else { ">" };
            parts.push(format!("{op} {min}"));
        }
        if let Some(ref max) = self.max {
            let op = if self.max_inclusive { "≤" } else { "<" };
            parts.push(format!("{op} {max}"));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("({})", parts.join(" && "))
        }
    }
}

// Whitespace-only parts are absent bounds, so `(, )` is the unbounded range
// while `(,)` is rejected above.
fn parse_bound(text: &str) -> Option<Option<Version>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(None);
    }
    if let Ok(version) = Version::parse(text) {
        return Some(Some(version));
    }
    match text.parse::<u64>() {
        Ok(major) if major > 0 => Some(Some(Version::major_only(major))),
        _ => None,
    }
}

impl FromStr for VersionRange {
    type Err = DepwalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(min), None) = (&self.min, &self.max) {
            if self.min_inclusive && !self.max_inclusive {
                return write!(f, "{min}");
            }
        }

        if self.is_exact() {
            if let Some(ref min) = self.min {
                return write!(f, "[{min}]");
            }
        }

        let min = self.min.as_ref().map(Version::to_string).unwrap_or_default();
        let max = self.max.as_ref().map(Version::to_string).unwrap_or_default();
        write!(
            f,
            "{}{min}, {max}{}",
            if self.min_inclusive { '[' } else { '(' },
            if self.max_inclusive { ']' } else { ')' },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_bounds_expand() {
        let range = VersionRange::parse("[1,2]").unwrap();
        assert_eq!(range.min().unwrap().to_string(), "1.0");
        assert_eq!(range.max().unwrap().to_string(), "2.0");
    }

    #[test]
    fn zero_and_negative_integers_rejected() {
        assert!(VersionRange::parse("[-1,2]").is_err());
        assert!(VersionRange::parse("[0,2]").is_err());
    }

    #[test]
    fn single_exclusive_value_matches_nothing() {
        let range = VersionRange::parse("(1.6)").unwrap();
        assert!(!range.satisfies(&Version::parse("1.6").unwrap()));
    }
}
