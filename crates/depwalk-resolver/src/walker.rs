//! Depth-first dependency walk shared by the install and uninstall planners.
//!
//! Each call to [`PackageWalker::walk`] owns its visited map and path stack,
//! so one walker can serve any number of walks. Nodes move through
//! `Unvisited -> InStack -> Resolved`; meeting an id that is still on the
//! path stack is a cycle, and the whole stack renders the error message.

use std::collections::HashMap;

use depwalk_core::comparer::VersionComparer;
use depwalk_core::dependency::PackageDependency;
use depwalk_core::package::Package;
use depwalk_util::errors::{DepwalkError, DepwalkResult};

use crate::target::PackageTarget;

/// Callbacks that specialise a walk.
pub trait WalkHooks {
    /// Pick the concrete package for `dependency`, or `None` if nothing fits.
    fn resolve_dependency(&mut self, dependency: &PackageDependency)
        -> DepwalkResult<Option<Package>>;

    /// Whether the dependencies of `package` should be walked.
    fn should_descend(&mut self, _package: &Package, _is_root: bool) -> bool {
        true
    }

    /// Called once per node, after all of its dependencies are resolved.
    fn on_resolved(&mut self, _info: &WalkInfo) -> DepwalkResult<()> {
        Ok(())
    }

    /// Error reported when [`resolve_dependency`](Self::resolve_dependency)
    /// finds nothing.
    fn unresolved(&self, dependency: &PackageDependency) -> DepwalkError {
        DepwalkError::UnresolvedDependency {
            id: dependency.id().to_string(),
            dependency: dependency.to_string(),
        }
    }
}

/// A bare resolver function is a walk with no extra behaviour.
impl<F> WalkHooks for F
where
    F: FnMut(&PackageDependency) -> Option<Package>,
{
    fn resolve_dependency(
        &mut self,
        dependency: &PackageDependency,
    ) -> DepwalkResult<Option<Package>> {
        Ok(self(dependency))
    }
}

/// Per-package state of one walk.
#[derive(Debug, Clone)]
pub struct WalkInfo {
    pub package: Package,
    pub target: PackageTarget,
    /// How many times the walk reached this package.
    pub visit_count: usize,
}

/// What a finished walk knows about every package it reached.
#[derive(Debug)]
pub struct WalkResult {
    comparer: VersionComparer,
    nodes: HashMap<String, WalkInfo>,
    post_order: Vec<String>,
}

impl WalkResult {
    pub fn info(&self, package: &Package) -> Option<&WalkInfo> {
        self.nodes.get(&node_key(&self.comparer, package))
    }

    /// Resolved packages, each after all of its dependencies.
    pub fn post_order(&self) -> impl Iterator<Item = &WalkInfo> {
        self.post_order.iter().filter_map(|key| self.nodes.get(key))
    }

    pub fn len(&self) -> usize {
        self.post_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.post_order.is_empty()
    }
}

/// The walk engine.
#[derive(Debug, Clone, Copy)]
pub struct PackageWalker {
    comparer: VersionComparer,
    ignore_dependencies: bool,
}

impl Default for PackageWalker {
    fn default() -> Self {
        Self::new(VersionComparer::IGNORE_METADATA)
    }
}

// A package is unvisited until it is pushed on `path`, in the stack while it
// is there, and resolved once it moves to `resolved`.
struct WalkState {
    resolved: HashMap<String, WalkInfo>,
    path: Vec<Package>,
    post_order: Vec<String>,
}

impl PackageWalker {
    pub fn new(comparer: VersionComparer) -> Self {
        Self {
            comparer,
            ignore_dependencies: false,
        }
    }

    pub fn ignore_dependencies(mut self, yes: bool) -> Self {
        self.ignore_dependencies = yes;
        self
    }

    pub fn comparer(&self) -> &VersionComparer {
        &self.comparer
    }

    /// Walk `root` and everything it depends on.
    pub fn walk<H: WalkHooks + ?Sized>(
        &self,
        root: &Package,
        hooks: &mut H,
    ) -> DepwalkResult<WalkResult> {
        let mut state = WalkState {
            resolved: HashMap::new(),
            path: Vec::new(),
            post_order: Vec::new(),
        };
        self.visit(root, hooks, &mut state)?;

        Ok(WalkResult {
            comparer: self.comparer,
            nodes: state.resolved,
            post_order: state.post_order,
        })
    }

    fn visit<H: WalkHooks + ?Sized>(
        &self,
        package: &Package,
        hooks: &mut H,
        state: &mut WalkState,
    ) -> DepwalkResult<PackageTarget> {
        if state
            .path
            .iter()
            .any(|p| p.id().eq_ignore_ascii_case(package.id()))
        {
            let mut path: Vec<String> = state.path.iter().map(Package::to_string).collect();
            path.push(package.to_string());
            return Err(DepwalkError::CircularDependency { path });
        }

        let key = node_key(&self.comparer, package);
        if let Some(info) = state.resolved.get_mut(&key) {
            info.visit_count += 1;
            return Ok(info.target);
        }

        tracing::debug!("Walking {package}");
        let is_root = state.path.is_empty();
        let mut target = PackageTarget::classify(package);
        state.path.push(package.clone());

        if !self.ignore_dependencies && hooks.should_descend(package, is_root) {
            let mut children = Vec::with_capacity(package.dependencies().len());
            for dependency in package.dependencies() {
                let resolved = hooks
                    .resolve_dependency(dependency)?
                    .ok_or_else(|| hooks.unresolved(dependency))?;
                tracing::debug!("Resolved {dependency} to {resolved}");
                children.push(self.visit(&resolved, hooks, state)?);
            }
            target = target.reconcile(&children)?;
        }

        state.path.pop();
        let info = WalkInfo {
            package: package.clone(),
            target,
            visit_count: 1,
        };
        hooks.on_resolved(&info)?;
        state.resolved.insert(key.clone(), info);
        state.post_order.push(key);

        Ok(target)
    }
}

/// Visited-map key: lowercase id plus the comparer's canonical version text.
fn node_key(comparer: &VersionComparer, package: &Package) -> String {
    format!(
        "{} {}",
        package.id().to_ascii_lowercase(),
        comparer.key(package.version())
    )
}
