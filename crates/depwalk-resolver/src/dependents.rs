use depwalk_core::comparer::VersionComparer;
use depwalk_core::package::Package;

use crate::repository::LocalPackageSet;

/// Answers "which packages in this set depend on that package?".
///
/// A full scan per query; installed sets are small.
pub struct DependentsWalker<'a> {
    packages: &'a dyn LocalPackageSet,
    comparer: VersionComparer,
}

impl<'a> DependentsWalker<'a> {
    pub fn new(packages: &'a dyn LocalPackageSet) -> Self {
        Self::with_comparer(packages, VersionComparer::IGNORE_METADATA)
    }

    pub fn with_comparer(packages: &'a dyn LocalPackageSet, comparer: VersionComparer) -> Self {
        Self { packages, comparer }
    }

    /// Packages declaring a dependency on `package`'s id whose range accepts
    /// its version.
    pub fn get_dependents(&self, package: &Package) -> Vec<Package> {
        self.packages
            .packages()
            .into_iter()
            .filter(|candidate| !candidate.is_same(package))
            .filter(|candidate| {
                candidate.dependencies().iter().any(|d| {
                    d.id().eq_ignore_ascii_case(package.id())
                        && d.satisfies_with(package.version(), &self.comparer)
                })
            })
            .collect()
    }
}
