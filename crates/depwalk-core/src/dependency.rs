use std::fmt;
use std::str::FromStr;

use depwalk_util::errors::{DepwalkError, DepwalkResult};

use crate::comparer::VersionComparer;
use crate::package::Package;
use crate::range::VersionRange;
use crate::version::Version;

/// A package's declared need for another package, by id and optional range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDependency {
    id: String,
    range: Option<VersionRange>,
}

impl PackageDependency {
    pub fn new(id: impl Into<String>, range: Option<VersionRange>) -> DepwalkResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DepwalkError::InvalidDependency { text: id });
        }
        Ok(Self { id, range })
    }

    /// Parse `"<id>"` or `"<id> <range>"`, e.g. `"B [1.0, 2.0)"`.
    pub fn parse(text: &str) -> DepwalkResult<Self> {
        let text = text.trim();
        match text.split_once(char::is_whitespace) {
            None => Self::new(text, None),
            Some((id, range)) => Self::new(id, Some(VersionRange::parse(range)?)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn range(&self) -> Option<&VersionRange> {
        self.range.as_ref()
    }

    /// A dependency without a range accepts any version.
    pub fn satisfies(&self, version: &Version) -> bool {
        self.range.as_ref().map_or(true, |r| r.satisfies(version))
    }

    pub fn satisfies_with(&self, version: &Version, comparer: &VersionComparer) -> bool {
        self.range
            .as_ref()
            .map_or(true, |r| r.satisfies_with(version, comparer))
    }

    /// Same id (ignoring case) and an acceptable version.
    pub fn matches(&self, package: &Package) -> bool {
        self.id.eq_ignore_ascii_case(package.id()) && self.satisfies(package.version())
    }

    /// Source form, `id` followed by the compact range text.
    pub fn to_declaration(&self) -> String {
        match self.range {
            Some(ref range) if !range.is_floating() => format!("{} {range}", self.id),
            _ => self.id.clone(),
        }
    }
}

impl FromStr for PackageDependency {
    type Err = DepwalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PackageDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = self
            .range
            .as_ref()
            .map(VersionRange::pretty_print)
            .unwrap_or_default();
        if pretty.is_empty() {
            f.write_str(&self.id)
        } else {
            write!(f, "{} {pretty}", self.id)
        }
    }
}
