use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depwalk operations.
///
/// Every walk either produces a complete operation list or fails with one of
/// these; no partial plan is ever returned.
#[derive(Debug, Error, Diagnostic)]
pub enum DepwalkError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration or feed document.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check depwalk.toml (or the feed file) for syntax errors"))]
    Config { message: String },

    /// Malformed version text.
    #[error("'{text}' is not a valid version string.")]
    InvalidVersionString { text: String },

    /// Malformed version range text.
    #[error("'{text}' is not a valid version string.")]
    InvalidRangeString { text: String },

    /// Malformed dependency declaration (`id [range]`).
    #[error("'{text}' is not a valid dependency.")]
    InvalidDependency { text: String },

    /// No available package satisfies a declared dependency.
    #[error("Unable to resolve dependency '{dependency}'")]
    UnresolvedDependency {
        /// Id of the dependency.
        id: String,
        /// Pretty-printed dependency (`id` plus its range, if constrained).
        dependency: String,
    },

    /// A package transitively depends on itself.
    #[error("Circular dependency detected '{}'", .path.join(" => "))]
    CircularDependency {
        /// Every node on the cycle in traversal order, the repeated one last.
        path: Vec<String>,
    },

    /// An installed package declares a dependency that is not installed.
    #[error("Unable to locate dependency '{id}'. It may have been uninstalled")]
    MissingDependency { id: String },

    /// An installed package still needs the package being removed.
    #[error("Unable to uninstall '{target}' because '{dependent}' depends on it")]
    DependentExists { target: String, dependent: String },

    /// A dependency-only package pulls in both project and external packages.
    #[error("Child dependencies of dependency only packages cannot mix external and project packages")]
    MixedTargetKinds,

    /// A solution-level package pulls in a project-level package.
    #[error("External packages cannot depend on packages that target projects.")]
    ExternalDependsOnProject,

    /// Replacing an installed version would break one of its dependents.
    #[error("Updating '{current}' to '{target}' failed. '{dependent}' depends on '{requirement}'")]
    UpdateConflict {
        current: String,
        target: String,
        dependent: String,
        requirement: String,
    },
}

impl DepwalkError {
    /// Get a user-friendly suggestion for fixing this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            DepwalkError::UnresolvedDependency { .. } => {
                Some("Check the package id and version range, or add a source that provides it")
            }
            DepwalkError::CircularDependency { .. } => {
                Some("Remove the circular dependency by restructuring the packages involved")
            }
            DepwalkError::DependentExists { .. } => {
                Some("Uninstall the dependent package first, or force the removal")
            }
            DepwalkError::UpdateConflict { .. } => {
                Some("Update the dependent package as well, or choose a compatible version")
            }
            _ => None,
        }
    }
}

/// Result alias for typed depwalk operations.
pub type DepwalkResult<T> = Result<T, DepwalkError>;
