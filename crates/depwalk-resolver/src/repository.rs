//! Collaborators the walkers read packages from.

use std::collections::HashMap;

use depwalk_core::feed::Feed;
use depwalk_core::package::Package;
use depwalk_core::range::VersionRange;
use depwalk_core::version::Version;
use depwalk_util::errors::DepwalkResult;

/// Packages available for installation.
pub trait PackageSource {
    /// Every known version of `id`, unfiltered. Ids compare ignoring case.
    fn find_packages(&self, id: &str) -> Vec<Package>;
}

/// Packages that are already installed.
pub trait LocalPackageSet {
    fn packages(&self) -> Vec<Package>;

    /// Installed versions of `id`, ignoring case.
    fn find_by_id(&self, id: &str) -> Vec<Package> {
        self.packages()
            .into_iter()
            .filter(|p| p.id().eq_ignore_ascii_case(id))
            .collect()
    }

    fn find(&self, id: &str, version: &Version) -> Option<Package> {
        self.find_by_id(id)
            .into_iter()
            .find(|p| p.version() == version)
    }

    fn exists(&self, id: &str, version: &Version) -> bool {
        self.find(id, version).is_some()
    }
}

/// Extra version restrictions applied on top of declared dependency ranges.
pub trait ConstraintProvider {
    fn constraint(&self, id: &str) -> Option<VersionRange>;
}

/// Constraints held in a map keyed by package id (case-insensitive).
///
/// An empty provider constrains nothing.
#[derive(Debug, Clone, Default)]
pub struct DefaultConstraintProvider {
    constraints: HashMap<String, VersionRange>,
}

impl DefaultConstraintProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_constraint(&mut self, id: &str, range: VersionRange) {
        self.constraints.insert(id.to_ascii_lowercase(), range);
    }

    pub fn with_constraint(mut self, id: &str, range: VersionRange) -> Self {
        self.add_constraint(id, range);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl ConstraintProvider for DefaultConstraintProvider {
    fn constraint(&self, id: &str) -> Option<VersionRange> {
        self.constraints.get(&id.to_ascii_lowercase()).cloned()
    }
}

/// A package list held in memory, usable both as a source and as the
/// installed set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    packages: Vec<Package>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_feed(feed: Feed) -> DepwalkResult<Self> {
        Ok(Self {
            packages: feed.into_packages()?,
        })
    }

    pub fn add(&mut self, package: Package) {
        self.packages.push(package);
    }

    /// Remove every entry with the same id and version. Returns whether
    /// anything was removed.
    pub fn remove(&mut self, package: &Package) -> bool {
        let before = self.packages.len();
        self.packages.retain(|p| !p.is_same(package));
        self.packages.len() != before
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }
}

impl From<Vec<Package>> for InMemoryRepository {
    fn from(packages: Vec<Package>) -> Self {
        Self { packages }
    }
}

impl FromIterator<Package> for InMemoryRepository {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        Self {
            packages: iter.into_iter().collect(),
        }
    }
}

impl PackageSource for InMemoryRepository {
    fn find_packages(&self, id: &str) -> Vec<Package> {
        self.packages
            .iter()
            .filter(|p| p.id().eq_ignore_ascii_case(id))
            .cloned()
            .collect()
    }
}

impl LocalPackageSet for InMemoryRepository {
    fn packages(&self) -> Vec<Package> {
        self.packages.clone()
    }

    fn find_by_id(&self, id: &str) -> Vec<Package> {
        self.find_packages(id)
    }
}
