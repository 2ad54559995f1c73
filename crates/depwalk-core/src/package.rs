use std::fmt;

use crate::dependency::PackageDependency;
use crate::version::Version;

/// A package descriptor as seen by the walkers.
///
/// A package with neither project content nor tools is dependency-only
/// (a meta-package); its placement is decided by what it depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    id: String,
    version: Version,
    dependencies: Vec<PackageDependency>,
    has_project_content: bool,
    has_tools_or_init: bool,
}

impl Package {
    pub fn new(id: impl Into<String>, version: Version) -> Self {
        Self {
            id: id.into(),
            version,
            dependencies: Vec::new(),
            has_project_content: false,
            has_tools_or_init: false,
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<PackageDependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_project_content(mut self, yes: bool) -> Self {
        self.has_project_content = yes;
        self
    }

    pub fn with_tools(mut self, yes: bool) -> Self {
        self.has_tools_or_init = yes;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn dependencies(&self) -> &[PackageDependency] {
        &self.dependencies
    }

    pub fn has_project_content(&self) -> bool {
        self.has_project_content
    }

    pub fn has_tools_or_init(&self) -> bool {
        self.has_tools_or_init
    }

    pub fn is_dependency_only(&self) -> bool {
        !self.has_project_content && !self.has_tools_or_init
    }

    /// Same id (ignoring case) and equal version under `Default` comparison.
    pub fn is_same(&self, other: &Package) -> bool {
        self.id.eq_ignore_ascii_case(&other.id) && self.version == other.version
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}
