//! Package version parsing and display.
//!
//! A [`Version`] accepts both strict SemVer 2.0 (`major.minor.patch`) and the
//! legacy 2 to 4 component form (`1.0`, `1.2.3.4`), followed by optional
//! dot-separated release labels (`-beta.2`) and build metadata (`+abc`).
//! The text that was parsed is kept verbatim for display; ordering and
//! equality are delegated to [`VersionComparer`](crate::comparer::VersionComparer).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use depwalk_util::errors::{DepwalkError, DepwalkResult};

use crate::comparer::VersionComparer;

/// An immutable package version.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    revision: Option<u64>,
    release_labels: Vec<String>,
    metadata: Option<String>,
    original: String,
}

impl Version {
    /// A `major.minor.patch` release version.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self::from_parts(major, minor, patch, None, Vec::new(), None)
    }

    /// A legacy four component version.
    pub fn with_revision(major: u64, minor: u64, patch: u64, revision: u64) -> Self {
        Self::from_parts(major, minor, patch, Some(revision), Vec::new(), None)
    }

    /// Build a version from explicit components. Labels containing `.` are
    /// split into separate labels and empty labels are dropped.
    pub fn from_parts(
        major: u64,
        minor: u64,
        patch: u64,
        revision: Option<u64>,
        release_labels: Vec<String>,
        metadata: Option<String>,
    ) -> Self {
        let mut version = Self {
            major,
            minor,
            patch,
            revision,
            release_labels: release_labels
                .iter()
                .flat_map(|l| l.split('.'))
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            metadata: metadata.filter(|m| !m.is_empty()),
            original: String::new(),
        };
        version.original = version.to_normalized_string();
        version
    }

    /// `major.0`, used for bare integers inside range brackets (`[1, 2]`).
    pub(crate) fn major_only(major: u64) -> Self {
        Self {
            major,
            minor: 0,
            patch: 0,
            revision: None,
            release_labels: Vec::new(),
            metadata: None,
            original: format!("{major}.0"),
        }
    }

    /// Parse a version using the loose rules: 2 to 4 numeric components
    /// (whitespace around the dots is ignored), then optional release labels
    /// and metadata.
    pub fn parse(text: &str) -> DepwalkResult<Self> {
        let invalid = || DepwalkError::InvalidVersionString {
            text: text.to_string(),
        };
        let trimmed = text.trim();
        let (rest, metadata) = split_metadata(trimmed).ok_or_else(invalid)?;
        let (core, release_labels) = split_release(rest).ok_or_else(invalid)?;

        let mut numbers = Vec::with_capacity(4);
        for part in core.split('.') {
            numbers.push(parse_component(part.trim()).ok_or_else(invalid)?);
        }
        if !(2..=4).contains(&numbers.len()) {
            return Err(invalid());
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers.get(2).copied().unwrap_or(0),
            revision: numbers.get(3).copied(),
            release_labels,
            metadata,
            original: trimmed.chars().filter(|c| !c.is_whitespace()).collect(),
        })
    }

    /// Parse a strict SemVer 2.0 version: exactly three components without
    /// leading zeros and no embedded whitespace.
    pub fn parse_strict(text: &str) -> DepwalkResult<Self> {
        let invalid = || DepwalkError::InvalidVersionString {
            text: text.to_string(),
        };
        let trimmed = text.trim();
        let (rest, metadata) = split_metadata(trimmed).ok_or_else(invalid)?;
        let (core, release_labels) = split_release(rest).ok_or_else(invalid)?;

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.len() > 1 && part.starts_with('0') {
                return Err(invalid());
            }
            *slot = parse_component(part).ok_or_else(invalid)?;
        }

        Ok(Self::from_parts(
            numbers[0],
            numbers[1],
            numbers[2],
            None,
            release_labels,
            metadata,
        ))
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The legacy fourth component, if the version was written with one.
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    pub fn release_labels(&self) -> &[String] {
        &self.release_labels
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    /// The text this version was parsed from, whitespace removed.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Release labels joined with `.` (empty for a release version).
    pub fn release(&self) -> String {
        self.release_labels.join(".")
    }

    pub fn is_prerelease(&self) -> bool {
        !self.release_labels.is_empty()
    }

    pub fn is_legacy(&self) -> bool {
        self.revision.is_some()
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    /// `major.minor.patch[.revision][-labels][+metadata]`.
    pub fn to_normalized_string(&self) -> String {
        let mut out = format!("{}.{}.{}", self.major, self.minor, self.patch);
        if let Some(revision) = self.revision {
            out.push_str(&format!(".{revision}"));
        }
        if self.is_prerelease() {
            out.push('-');
            out.push_str(&self.release());
        }
        if let Some(ref metadata) = self.metadata {
            out.push('+');
            out.push_str(metadata);
        }
        out
    }
}

fn split_metadata(text: &str) -> Option<(&str, Option<String>)> {
    match text.split_once('+') {
        None => Some((text, None)),
        Some((rest, metadata)) => {
            if !metadata.split('.').all(is_identifier) {
                return None;
            }
            Some((rest, Some(metadata.to_string())))
        }
    }
}

fn split_release(text: &str) -> Option<(&str, Vec<String>)> {
    match text.split_once('-') {
        None => Some((text, Vec::new())),
        Some((core, release)) => {
            let labels: Vec<&str> = release.split('.').collect();
            if !labels.iter().all(|l| is_identifier(l)) {
                return None;
            }
            Some((core, labels.into_iter().map(str::to_string).collect()))
        }
    }
}

fn is_identifier(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for Version {
    type Err = DepwalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        VersionComparer::DEFAULT.equals(self, other)
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        VersionComparer::DEFAULT.hash(self, state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        VersionComparer::DEFAULT.compare(self, other)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
