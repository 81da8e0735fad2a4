// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;
use crate::scrape::EXPORT_HEADER;

/// Write the export artifact for one extraction window.
/// Returns the final path written to.
pub fn write_export(
    export: &ExportOptions,
    start: NaiveDate,
    end: NaiveDate,
    rows: &[Vec<String>],
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = export.out_path(start, end);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(&EXPORT_HEADER, rows, export.delimiter());
    fs::write(&path, contents)?;
    logf!("Export: wrote {} rows → {}", rows.len(), path.display());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
