use std::fmt;

use depwalk_core::package::Package;

/// What to do with a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageAction {
    Install,
    Uninstall,
}

/// One step of an install or uninstall plan. Plans are applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOperation {
    pub package: Package,
    pub action: PackageAction,
}

impl PackageOperation {
    pub fn install(package: Package) -> Self {
        Self {
            package,
            action: PackageAction::Install,
        }
    }

    pub fn uninstall(package: Package) -> Self {
        Self {
            package,
            action: PackageAction::Uninstall,
        }
    }
}

impl fmt::Display for PackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageAction::Install => write!(f, "Install"),
            PackageAction::Uninstall => write!(f, "Uninstall"),
        }
    }
}

impl fmt::Display for PackageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.package)
    }
}
