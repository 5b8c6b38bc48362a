//! Storage initialization
//!
//! Handles first-run setup: directories, empty data files and the settings
//! file. Existing files are never overwritten.

use tracing::info;

use crate::config::paths::FintrackPaths;
use crate::config::settings::Settings;
use crate::error::FintrackError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Returns `true` if anything was created.
pub fn initialize_storage(paths: &FintrackPaths) -> Result<bool, FintrackError> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.transactions_file().exists() {
        write_json_atomic(
            paths.transactions_file(),
            &serde_json::json!({ "transactions": [] }),
        )?;
        created = true;
    }

    if !paths.budgets_file().exists() {
        write_json_atomic(paths.budgets_file(), &serde_json::json!({ "budgets": [] }))?;
        created = true;
    }

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        created = true;
    }

    if created {
        info!(base = %paths.base_dir().display(), "initialized fintrack storage");
    }

    Ok(created)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FintrackPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        assert!(initialize_storage(&paths).unwrap());

        assert!(!needs_initialization(&paths));
        assert!(paths.transactions_file().exists());
        assert!(paths.budgets_file().exists());
        assert!(paths.settings_file().exists());
    }

    #[test]
    fn test_initialized_files_load_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let storage = Storage::open(paths).unwrap();
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert_eq!(storage.budgets.count().unwrap(), 0);
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();
        std::fs::write(paths.budgets_file(), r#"{"budgets": [], "marker": true}"#).unwrap();

        assert!(!initialize_storage(&paths).unwrap());
        let content = std::fs::read_to_string(paths.budgets_file()).unwrap();
        assert!(content.contains("marker"));
    }
}
