use std::path::{Path, PathBuf};

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Read a UTF-8 text file, describing the failure with `what` (e.g. "config").
pub fn read_text(path: &Path, what: &str) -> Result<String, crate::errors::DepwalkError> {
    std::fs::read_to_string(path).map_err(|e| crate::errors::DepwalkError::Config {
        message: format!("Failed to read {what} at {}: {e}", path.display()),
    })
}
