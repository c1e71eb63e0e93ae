//! Small helpers shared across the crate.

/// Convert a file path to a display-friendly string.
pub fn path_to_string(path: &std::path::Path) -> String {
    path.to_string_lossy().to_string()
}
