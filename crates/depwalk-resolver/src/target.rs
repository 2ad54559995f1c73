//! Where a package lands once installed.

use std::fmt;

use depwalk_core::package::Package;
use depwalk_util::errors::{DepwalkError, DepwalkResult};

/// Installation target of a walked package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackageTarget {
    /// Not decided: a dependency-only package whose children did not settle it.
    #[default]
    None,
    /// Carries content that attaches to a project.
    Project,
    /// Solution level: tools or init scripts only.
    External,
}

impl PackageTarget {
    /// Initial target of a package before its dependencies are walked.
    pub fn classify(package: &Package) -> Self {
        if package.has_project_content() {
            PackageTarget::Project
        } else if package.has_tools_or_init() {
            PackageTarget::External
        } else {
            PackageTarget::None
        }
    }

    /// Final target of a package given the targets of its direct dependencies.
    ///
    /// A dependency-only package takes the single target its children agree
    /// on and stays `None` while any child is undecided.
    pub fn reconcile(self, children: &[PackageTarget]) -> DepwalkResult<Self> {
        let has_project = children.contains(&PackageTarget::Project);
        let has_external = children.contains(&PackageTarget::External);

        match self {
            PackageTarget::None => {
                if has_project && has_external {
                    return Err(DepwalkError::MixedTargetKinds);
                }
                if children.is_empty() || children.contains(&PackageTarget::None) {
                    Ok(PackageTarget::None)
                } else if has_project {
                    Ok(PackageTarget::Project)
                } else {
                    Ok(PackageTarget::External)
                }
            }
            PackageTarget::External if has_project => Err(DepwalkError::ExternalDependsOnProject),
            target => Ok(target),
        }
    }
}

impl fmt::Display for PackageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageTarget::None => write!(f, "none"),
            PackageTarget::Project => write!(f, "project"),
            PackageTarget::External => write!(f, "external"),
        }
    }
}
