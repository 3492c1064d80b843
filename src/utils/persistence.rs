//! Paths and JSON loading for ~/.numcrunch/.
//!
//! Only configuration is read from here. Game progress is never written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.numcrunch/ directory path, creating it if needed.
pub fn app_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".numcrunch");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file in ~/.numcrunch/.
pub fn app_path(filename: &str) -> io::Result<PathBuf> {
    Ok(app_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if it is missing or invalid.
pub fn load_json_from_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Load a JSON file from ~/.numcrunch/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    match app_path(filename) {
        Ok(path) => load_json_from_or_default(&path),
        Err(_) => T::default(),
    }
}
