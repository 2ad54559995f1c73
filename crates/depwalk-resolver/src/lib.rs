//! Dependency walking engine: cycle-safe depth-first traversal, install target
//! classification, and ordered install and uninstall planning.
//!
//! Walkers read packages through the collaborator traits in [`repository`]
//! and never touch disk or network themselves.

pub mod dependents;
pub mod install;
pub mod operation;
pub mod repository;
pub mod target;
pub mod uninstall;
pub mod walker;

pub use dependents::DependentsWalker;
pub use install::InstallWalker;
pub use operation::{PackageAction, PackageOperation};
pub use repository::{
    ConstraintProvider, DefaultConstraintProvider, InMemoryRepository, LocalPackageSet,
    PackageSource,
};
pub use target::PackageTarget;
pub use uninstall::UninstallWalker;
pub use walker::{PackageWalker, WalkHooks, WalkInfo, WalkResult};
