//! Core data types for depwalk.
//!
//! This crate defines the values the walkers operate on: versions and their
//! comparison modes, version ranges, dependencies, package descriptors,
//! declarative package feeds, and walker configuration.
//!
//! This crate never touches the network and only reads files when asked to
//! load a feed or config.

pub mod comparer;
pub mod config;
pub mod dependency;
pub mod feed;
pub mod package;
pub mod range;
pub mod version;

pub use comparer::{VersionComparer, VersionComparison};
pub use dependency::PackageDependency;
pub use package::Package;
pub use range::VersionRange;
pub use version::Version;
