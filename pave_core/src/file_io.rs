//! # File I/O Module
//!
//! Settings file operations:
//! - **Atomic saves**: write to a `.tmp` sibling, sync, rename
//! - **Version validation**: reject files from an incompatible schema
//! - **Value validation**: calibration weights are range-checked on load
//!
//! ## Example
//!
//! ```rust,no_run
//! use pave_core::file_io::{load_settings, save_settings};
//! use pave_core::settings::AdvisorSettings;
//! use std::path::Path;
//!
//! let settings = AdvisorSettings::new();
//! save_settings(&settings, Path::new("pave-settings.json"))?;
//! let loaded = load_settings(Path::new("pave-settings.json"))?;
//! # Ok::<(), pave_core::errors::PaveError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{PaveError, PaveResult};
use crate::settings::{AdvisorSettings, SCHEMA_VERSION};

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "pave-settings.json";

/// Temp file path used during an atomic save
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp_path = path.to_path_buf();
    let extension = tmp_path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp_path.set_extension(extension);
    tmp_path
}

/// Save settings with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to a temporary file next to `path`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_settings(settings: &AdvisorSettings, path: &Path) -> PaveResult<()> {
    let json = serde_json::to_string_pretty(settings).map_err(|e| PaveError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        PaveError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        PaveError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        PaveError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        PaveError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

/// Load settings from a file.
///
/// # Returns
///
/// * `Err(PaveError::VersionMismatch)` - File version is incompatible
/// * `Err(PaveError::CalibrationOutOfRange)` - Stored weights out of range
/// * `Err(PaveError::SerializationError)` - Invalid JSON
/// * `Err(PaveError::FileError)` - I/O error
pub fn load_settings(path: &Path) -> PaveResult<AdvisorSettings> {
    let mut file = File::open(path)
        .map_err(|e| PaveError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| PaveError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings: AdvisorSettings = serde_json::from_str(&contents)
        .map_err(|e| PaveError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&settings.version)?;
    settings.validate()?;

    tracing::debug!(path = %path.display(), version = %settings.version, "loaded settings");
    Ok(settings)
}

/// Load settings, or fresh defaults when the file does not exist.
/// Any other failure is returned.
pub fn load_or_default(path: &Path) -> PaveResult<AdvisorSettings> {
    if path.exists() {
        load_settings(path)
    } else {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        Ok(AdvisorSettings::new())
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> PaveResult<()> {
    let mismatch = || PaveError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // In 0.x a newer minor version may carry breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pavement::{PavementType, PerType};
    use crate::scoring::Calibration;
    use std::env::temp_dir;

    fn temp_settings_path(name: &str) -> PathBuf {
        temp_dir().join(format!("pave_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(tmp_path_for(Path::new("/etc/pave/settings.json")), Path::new("/etc/pave/settings.json.tmp"));
        assert_eq!(tmp_path_for(Path::new("settings")), Path::new("settings.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_settings_path("roundtrip");

        let mut settings = AdvisorSettings::new();
        settings.set_calibration(Calibration::new(PerType::from_array([1.0, 1.2, 0.8, 1.0])).unwrap());
        settings.monte_carlo.seed = Some(42);
        save_settings(&settings, &path).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.calibration().unwrap().map(|c| c.weight(PavementType::Crcp)), Some(0.8));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_settings_path("atomic");
        save_settings(&AdvisorSettings::new(), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let path = temp_settings_path("missing");
        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        let settings = load_or_default(&path).unwrap();
        assert_eq!(settings.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_rejects_bad_files() {
        let path = temp_settings_path("bad_json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");

        fs::write(&path, r#"{ "version": "0.2.0", "modified": "2025-01-15T09:30:00Z" }"#).unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "VERSION_MISMATCH");

        fs::write(
            &path,
            r#"{ "version": "0.1.0", "modified": "2025-01-15T09:30:00Z",
                 "calibration": { "JPCP": 0.2, "JRCP": 1.0, "CRCP": 1.0, "PCP": 1.0 } }"#,
        )
        .unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "CALIBRATION_OUT_OF_RANGE");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
