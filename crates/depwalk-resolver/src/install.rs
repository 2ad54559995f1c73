//! Install planning.
//!
//! Dependencies already satisfied by an installed package are left alone.
//! Otherwise the source candidate on the lowest `major.minor` line that fits
//! is chosen, preferring the highest patch and revision within that line.

use std::cmp::Ordering;

use depwalk_core::comparer::VersionComparer;
use depwalk_core::config::WalkerConfig;
use depwalk_core::dependency::PackageDependency;
use depwalk_core::package::Package;
use depwalk_core::version::Version;
use depwalk_util::errors::{DepwalkError, DepwalkResult};

use crate::dependents::DependentsWalker;
use crate::operation::PackageOperation;
use crate::repository::{ConstraintProvider, LocalPackageSet, PackageSource};
use crate::target::PackageTarget;
use crate::walker::{PackageWalker, WalkHooks, WalkInfo};

/// Plans the operations that install a package and its dependencies.
pub struct InstallWalker<'a> {
    local: &'a dyn LocalPackageSet,
    source: &'a dyn PackageSource,
    constraints: &'a dyn ConstraintProvider,
    comparer: VersionComparer,
    ignore_dependencies: bool,
    allow_prerelease: bool,
    upgrade: bool,
    project_scoped: bool,
}

impl<'a> InstallWalker<'a> {
    pub fn new(
        local: &'a dyn LocalPackageSet,
        source: &'a dyn PackageSource,
        constraints: &'a dyn ConstraintProvider,
    ) -> Self {
        Self {
            local,
            source,
            constraints,
            comparer: VersionComparer::IGNORE_METADATA,
            ignore_dependencies: false,
            allow_prerelease: true,
            upgrade: false,
            project_scoped: false,
        }
    }

    /// Install into a single project: solution-level (external) packages and
    /// meta-packages that never settle on a project target are walked but
    /// get no operation.
    pub fn for_project(
        local: &'a dyn LocalPackageSet,
        source: &'a dyn PackageSource,
        constraints: &'a dyn ConstraintProvider,
    ) -> Self {
        Self {
            project_scoped: true,
            ..Self::new(local, source, constraints)
        }
    }

    /// Apply the `[versioning]` and `[install]` settings.
    pub fn with_config(self, config: &WalkerConfig) -> Self {
        self.comparer(config.comparer())
            .ignore_dependencies(config.install.ignore_dependencies)
            .allow_prerelease(config.install.allow_prerelease)
            .upgrade(config.install.upgrade)
    }

    pub fn comparer(mut self, comparer: VersionComparer) -> Self {
        self.comparer = comparer;
        self
    }

    pub fn ignore_dependencies(mut self, yes: bool) -> Self {
        self.ignore_dependencies = yes;
        self
    }

    /// When off, prerelease candidates are only considered for dependencies
    /// whose range itself names a prerelease.
    pub fn allow_prerelease(mut self, yes: bool) -> Self {
        self.allow_prerelease = yes;
        self
    }

    /// Resolve from the source even when an installed version fits, replacing
    /// installed versions of the chosen packages.
    pub fn upgrade(mut self, yes: bool) -> Self {
        self.upgrade = yes;
        self
    }

    /// Operations installing `root`, every dependency before its dependents.
    pub fn resolve_operations(&self, root: &Package) -> DepwalkResult<Vec<PackageOperation>> {
        let mut hooks = InstallHooks {
            walker: self,
            root_id: root.id(),
            operations: Vec::new(),
        };
        PackageWalker::new(self.comparer)
            .ignore_dependencies(self.ignore_dependencies)
            .walk(root, &mut hooks)?;

        tracing::info!(
            "Planned {} install operation(s) for {root}",
            hooks.operations.len()
        );
        Ok(hooks.operations)
    }

    fn accepts(&self, dependency: &PackageDependency, version: &Version) -> bool {
        if !dependency.satisfies_with(version, &self.comparer) {
            return false;
        }
        if let Some(constraint) = self.constraints.constraint(dependency.id()) {
            if !constraint.satisfies_with(version, &self.comparer) {
                return false;
            }
        }
        self.allow_prerelease
            || !version.is_prerelease()
            || dependency
                .range()
                .is_some_and(|r| r.contains_prerelease_bound())
    }

    fn is_installed(&self, package: &Package) -> bool {
        self.local
            .find_by_id(package.id())
            .iter()
            .any(|p| self.comparer.equals(p.version(), package.version()))
    }

    // Lowest (major, minor) wins, then highest (patch, revision).
    fn preference(&self, a: &Version, b: &Version) -> Ordering {
        (a.major(), a.minor())
            .cmp(&(b.major(), b.minor()))
            .then_with(|| (b.patch(), b.revision()).cmp(&(a.patch(), a.revision())))
            .then_with(|| self.comparer.compare(b, a))
    }
}

struct InstallHooks<'w, 'a> {
    walker: &'w InstallWalker<'a>,
    root_id: &'w str,
    operations: Vec<PackageOperation>,
}

impl InstallHooks<'_, '_> {
    /// Every installed dependent of `current` must also accept `target`.
    fn check_update(&self, current: &Package, target: &Package) -> DepwalkResult<()> {
        let walker = self.walker;
        let dependents = DependentsWalker::with_comparer(walker.local, walker.comparer);
        for dependent in dependents.get_dependents(current) {
            // The root is being replaced along with its dependencies.
            if dependent.id().eq_ignore_ascii_case(self.root_id) {
                continue;
            }
            let requirement = dependent.dependencies().iter().find(|d| {
                d.id().eq_ignore_ascii_case(current.id())
                    && !d.satisfies_with(target.version(), &walker.comparer)
            });
            if let Some(requirement) = requirement {
                return Err(DepwalkError::UpdateConflict {
                    current: current.to_string(),
                    target: target.to_string(),
                    dependent: dependent.to_string(),
                    requirement: requirement.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl WalkHooks for InstallHooks<'_, '_> {
    fn resolve_dependency(
        &mut self,
        dependency: &PackageDependency,
    ) -> DepwalkResult<Option<Package>> {
        let walker = self.walker;

        let installed = walker
            .local
            .find_by_id(dependency.id())
            .into_iter()
            .filter(|p| walker.accepts(dependency, p.version()))
            .max_by(|a, b| walker.comparer.compare(a.version(), b.version()));
        if !walker.upgrade {
            if let Some(installed) = installed {
                tracing::debug!("{dependency} is satisfied by installed {installed}");
                return Ok(Some(installed));
            }
        }

        let chosen = walker
            .source
            .find_packages(dependency.id())
            .into_iter()
            .filter(|p| walker.accepts(dependency, p.version()))
            .min_by(|a, b| walker.preference(a.version(), b.version()));
        if chosen.is_none() {
            if let Some(ref installed) = installed {
                tracing::debug!("No upgrade for {dependency}, keeping installed {installed}");
            }
            return Ok(installed);
        }
        Ok(chosen)
    }

    fn should_descend(&mut self, package: &Package, is_root: bool) -> bool {
        is_root || !self.walker.is_installed(package)
    }

    fn on_resolved(&mut self, info: &WalkInfo) -> DepwalkResult<()> {
        let walker = self.walker;
        let package = &info.package;

        if walker.project_scoped && info.target != PackageTarget::Project {
            tracing::debug!("Skipping {package}: target is {}", info.target);
            return Ok(());
        }
        if walker.is_installed(package) {
            tracing::debug!("{package} is already installed");
            return Ok(());
        }

        if walker.upgrade {
            for current in walker.local.find_by_id(package.id()) {
                self.check_update(&current, package)?;
                tracing::debug!("Replacing {current} with {package}");
                self.operations.push(PackageOperation::uninstall(current));
            }
        }
        self.operations.push(PackageOperation::install(package.clone()));
        Ok(())
    }
}
