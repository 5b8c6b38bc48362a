//! YAML Export functionality
//!
//! Writes the same structure as the JSON export in a human-readable form.

use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export all data to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# fintrack data export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FintrackError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FintrackError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> FintrackResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FintrackError::Import(e.to_string()))?;

    export.validate().map_err(FintrackError::Import)?;

    Ok(export)
}
