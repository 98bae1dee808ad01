//! Custom validation functions for CLI arguments

use std::path::PathBuf;

/// Validate that a configuration file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    // Check if file exists
    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    // Check if it's a file (not a directory)
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    // Check if file is readable
    if let Err(e) = std::fs::File::open(&path) {
        return Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        ));
    }

    Ok(path)
}
