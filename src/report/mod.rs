//! Renders the collected record into a paginated PDF document.
//!
//! The exporter runs in two stages: [`layout`] flattens the nested record
//! into styled lines and splits them into pages with a vertical cursor;
//! [`pdf`] emits those pages as a PDF file.

/// Line flattening and pagination.
pub mod layout;

/// PDF emission.
pub mod pdf;

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::data::record::CollectedRecord;

/// File name prefix of exported documents.
pub const EXPORT_PREFIX: &str = "Datenerfassung";

/// Errors raised while producing the export document.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("pdf generation failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
}

/// Lays out, renders and writes the record; returns the written path.
///
/// The file is named `Datenerfassung_<YYYYMMDD_HHMMSS>.pdf` and placed in
/// `dir`.
///
/// # Errors
///
/// Returns errors when page content cannot be encoded or the file cannot be
/// written. The record is left untouched so the export can be retried.
pub fn export(record: &CollectedRecord, dir: &Path) -> Result<PathBuf, ReportError> {
    let pages = layout::paginate(&layout::flatten(record));
    let mut doc = pdf::render(&pages)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{EXPORT_PREFIX}_{timestamp}.pdf"));
    pdf::save(&mut doc, &path)?;
    info!("report written to {}", path.display());
    Ok(path)
}
