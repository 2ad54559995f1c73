use depwalk_core::comparer::VersionComparer;
use depwalk_core::dependency::PackageDependency;
use depwalk_core::package::Package;
use depwalk_core::version::Version;
use depwalk_resolver::{PackageTarget, PackageWalker, WalkHooks};
use depwalk_util::errors::{DepwalkError, DepwalkResult};

fn pkg(id: &str, version: &str, deps: &[&str]) -> Package {
    Package::new(id, Version::parse(version).unwrap()).with_dependencies(
        deps.iter()
            .map(|d| PackageDependency::parse(d).unwrap())
            .collect(),
    )
}

fn resolver(all: &[Package]) -> impl FnMut(&PackageDependency) -> Option<Package> + '_ {
    move |d| {
        all.iter()
            .filter(|p| d.matches(p) && d.satisfies(p.version()))
            .max_by(|a, b| VersionComparer::DEFAULT.compare(a.version(), b.version()))
            .cloned()
    }
}

#[test]
fn test_meta_package_inherits_project_target() {
    let meta = pkg("M", "1.0", &["B", "C"]);
    let all = [
        pkg("B", "1.0", &[]).with_project_content(true),
        pkg("C", "1.0", &[]).with_project_content(true),
    ];
    assert_eq!(PackageTarget::classify(&meta), PackageTarget::None);

    let result = PackageWalker::default()
        .walk(&meta, &mut resolver(&all))
        .unwrap();
    assert_eq!(result.info(&meta).unwrap().target, PackageTarget::Project);
    assert_eq!(result.len(), 3);
}

#[test]
fn test_meta_package_mixing_targets_fails() {
    let meta = pkg("M", "1.0", &["B", "C"]);
    let all = [
        pkg("B", "1.0", &[]).with_project_content(true),
        pkg("C", "1.0", &[]).with_tools(true),
    ];
    let err = PackageWalker::default()
        .walk(&meta, &mut resolver(&all))
        .unwrap_err();
    assert!(matches!(err, DepwalkError::MixedTargetKinds));
}

#[test]
fn test_external_depending_on_project_fails() {
    let root = pkg("A", "1.0", &["B"]).with_tools(true);
    let all = [pkg("B", "1.0", &[]).with_project_content(true)];
    let err = PackageWalker::default()
        .walk(&root, &mut resolver(&all))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "External packages cannot depend on packages that target projects."
    );
}

#[test]
fn test_cycle_reports_full_path() {
    let all = [
        pkg("B", "1.0", &["C"]),
        pkg("C", "1.0", &["A"]),
        pkg("A", "1.0", &["B"]),
    ];
    let err = PackageWalker::default()
        .walk(&all[2], &mut resolver(&all))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Circular dependency detected 'A 1.0 => B 1.0 => C 1.0 => A 1.0'"
    );
}

#[test]
fn test_ignore_dependencies_visits_root_only() {
    let mut resolve = |_: &PackageDependency| -> Option<Package> { None };
    let result = PackageWalker::default()
        .ignore_dependencies(true)
        .walk(&pkg("A", "1.0", &["Missing"]), &mut resolve)
        .unwrap();
    assert_eq!(result.len(), 1);
}

#[test]
fn test_versions_equal_under_comparer_share_a_node() {
    let root = pkg("A", "1.0", &["B [1.0]", "C"]);
    let all = [
        pkg("B", "1.0+build1", &[]),
        pkg("C", "1.0", &["B [1.0+build2]"]),
    ];
    // C's exact pin still matches B 1.0+build1 since metadata is ignored.
    let mut resolve = |d: &PackageDependency| {
        all.iter()
            .find(|p| d.matches(p) && d.satisfies(p.version()))
            .cloned()
    };
    let result = PackageWalker::default().walk(&root, &mut resolve).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result.info(&all[0]).unwrap().visit_count, 2);
}

struct Recording {
    all: Vec<Package>,
    seen: Vec<String>,
}

impl WalkHooks for Recording {
    fn resolve_dependency(
        &mut self,
        dependency: &PackageDependency,
    ) -> DepwalkResult<Option<Package>> {
        Ok(self.all.iter().find(|p| dependency.matches(p)).cloned())
    }

    fn should_descend(&mut self, package: &Package, is_root: bool) -> bool {
        is_root || package.id() != "B"
    }

    fn on_resolved(&mut self, info: &depwalk_resolver::WalkInfo) -> DepwalkResult<()> {
        self.seen.push(info.package.id().to_string());
        Ok(())
    }
}

#[test]
fn test_hooks_control_descent() {
    let mut hooks = Recording {
        all: vec![pkg("B", "1.0", &["C"]), pkg("C", "1.0", &[])],
        seen: Vec::new(),
    };
    PackageWalker::default()
        .walk(&pkg("A", "1.0", &["B"]), &mut hooks)
        .unwrap();
    assert_eq!(hooks.seen, ["B", "A"]);
}
