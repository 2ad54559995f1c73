use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use depwalk_util::errors::{DepwalkError, DepwalkResult};

use crate::dependency::PackageDependency;
use crate::package::Package;
use crate::version::Version;

/// A declarative package list, used to seed repositories.
///
/// ```toml
/// [[package]]
/// id = "A"
/// version = "1.0"
/// dependencies = ["B", "C [1.0, 2.0)"]
/// content = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub package: Vec<FeedPackage>,
}

/// One `[[package]]` entry, kept as text until [`Feed::into_packages`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPackage {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub content: bool,
    #[serde(default)]
    pub tools: bool,
}

impl Feed {
    /// Load and parse a feed file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = depwalk_util::fs::read_text(path, "feed")?;
        Ok(content.parse()?)
    }

    /// Build a feed describing existing packages.
    pub fn from_packages<'a>(packages: impl IntoIterator<Item = &'a Package>) -> Self {
        let package = packages
            .into_iter()
            .map(|p| FeedPackage {
                id: p.id().to_string(),
                version: p.version().to_string(),
                dependencies: p
                    .dependencies()
                    .iter()
                    .map(PackageDependency::to_declaration)
                    .collect(),
                content: p.has_project_content(),
                tools: p.has_tools_or_init(),
            })
            .collect();
        Self { package }
    }

    /// Parse every version and dependency. Fails on the first malformed entry.
    pub fn into_packages(self) -> DepwalkResult<Vec<Package>> {
        self.package
            .into_iter()
            .map(FeedPackage::into_package)
            .collect()
    }

    /// Serialize the feed to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl FeedPackage {
    pub fn into_package(self) -> DepwalkResult<Package> {
        let version = Version::parse(&self.version)?;
        let dependencies = self
            .dependencies
            .iter()
            .map(|d| PackageDependency::parse(d))
            .collect::<DepwalkResult<Vec<_>>>()?;
        Ok(Package::new(self.id, version)
            .with_dependencies(dependencies)
            .with_project_content(self.content)
            .with_tools(self.tools))
    }
}

impl FromStr for Feed {
    type Err = DepwalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| DepwalkError::Config {
            message: format!("Failed to parse feed: {e}"),
        })
    }
}
