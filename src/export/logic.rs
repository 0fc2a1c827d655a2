// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::PaymentExport;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write report rows to `file` in the requested format.
    ///
    /// Nothing is written when there are no rows.
    pub fn export(
        rows: &[PaymentExport],
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<bool> {
        if rows.is_empty() {
            warning("No payments found for the selected filters.");
            return Ok(false);
        }

        let path = Path::new(file);
        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(rows, path)?,
            ExportFormat::Json => export_json(rows, path)?,
            ExportFormat::Xlsx => export_xlsx(rows, path)?,
        }
        Ok(true)
    }
}
