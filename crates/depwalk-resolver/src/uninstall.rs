//! Uninstall planning.
//!
//! The installed set is both the graph and the resolution source. The walk
//! collects the candidate closure; removal is then decided dependents-first,
//! so a package is only removed once everything installed that needs it is
//! already in the removal set.

use std::collections::HashSet;

use depwalk_core::comparer::VersionComparer;
use depwalk_core::config::WalkerConfig;
use depwalk_core::dependency::PackageDependency;
use depwalk_core::package::Package;
use depwalk_util::errors::{DepwalkError, DepwalkResult};

use crate::dependents::DependentsWalker;
use crate::operation::PackageOperation;
use crate::repository::LocalPackageSet;
use crate::walker::{PackageWalker, WalkHooks};

/// Plans the operations that remove an installed package.
pub struct UninstallWalker<'a> {
    local: &'a dyn LocalPackageSet,
    comparer: VersionComparer,
    force: bool,
    remove_dependencies: bool,
}

impl<'a> UninstallWalker<'a> {
    pub fn new(local: &'a dyn LocalPackageSet) -> Self {
        Self {
            local,
            comparer: VersionComparer::IGNORE_METADATA,
            force: false,
            remove_dependencies: false,
        }
    }

    /// Apply the `[versioning]` and `[uninstall]` settings.
    pub fn with_config(self, config: &WalkerConfig) -> Self {
        self.comparer(config.comparer())
            .force(config.uninstall.force)
            .remove_dependencies(config.uninstall.remove_dependencies)
    }

    pub fn comparer(mut self, comparer: VersionComparer) -> Self {
        self.comparer = comparer;
        self
    }

    /// Remove packages even when installed packages still depend on them.
    pub fn force(mut self, yes: bool) -> Self {
        self.force = yes;
        self
    }

    /// Also remove dependencies nothing else needs.
    pub fn remove_dependencies(mut self, yes: bool) -> Self {
        self.remove_dependencies = yes;
        self
    }

    /// Operations removing `root`, every package before its dependencies.
    pub fn resolve_operations(&self, root: &Package) -> DepwalkResult<Vec<PackageOperation>> {
        let mut hooks = UninstallHooks {
            local: self.local,
            comparer: self.comparer,
        };
        let walk = PackageWalker::new(self.comparer)
            .ignore_dependencies(!self.remove_dependencies)
            .walk(root, &mut hooks)?;

        let candidates: Vec<&Package> = walk.post_order().map(|info| &info.package).collect();
        let dependents = DependentsWalker::with_comparer(self.local, self.comparer);
        let mut removing: Vec<&Package> = Vec::new();
        let mut removed: HashSet<String> = HashSet::new();

        for package in candidates.into_iter().rev() {
            let blocking = dependents
                .get_dependents(package)
                .into_iter()
                .find(|d| !removed.contains(&self.key(d)));

            if let Some(dependent) = blocking {
                if self.force {
                    tracing::warn!("Removing {package} even though {dependent} depends on it");
                } else if package.is_same(root) {
                    return Err(DepwalkError::DependentExists {
                        target: package.to_string(),
                        dependent: dependent.to_string(),
                    });
                } else {
                    tracing::warn!("Keeping {package} because {dependent} depends on it");
                    continue;
                }
            }

            removed.insert(self.key(package));
            removing.push(package);
        }

        tracing::info!(
            "Planned {} uninstall operation(s) for {root}",
            removing.len()
        );
        Ok(removing
            .into_iter()
            .cloned()
            .map(PackageOperation::uninstall)
            .collect())
    }

    fn key(&self, package: &Package) -> String {
        format!(
            "{} {}",
            package.id().to_ascii_lowercase(),
            self.comparer.key(package.version())
        )
    }
}

struct UninstallHooks<'a> {
    local: &'a dyn LocalPackageSet,
    comparer: VersionComparer,
}

impl WalkHooks for UninstallHooks<'_> {
    fn resolve_dependency(
        &mut self,
        dependency: &PackageDependency,
    ) -> DepwalkResult<Option<Package>> {
        Ok(self
            .local
            .find_by_id(dependency.id())
            .into_iter()
            .filter(|p| dependency.satisfies_with(p.version(), &self.comparer))
            .max_by(|a, b| self.comparer.compare(a.version(), b.version())))
    }

    fn unresolved(&self, dependency: &PackageDependency) -> DepwalkError {
        DepwalkError::MissingDependency {
            id: dependency.id().to_string(),
        }
    }
}
