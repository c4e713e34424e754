//! Symbol exporter: directory listing to a single-column xlsx workbook.
//!
//! The file name is chosen by probing the output directory for
//! `tsx_symbols.xlsx`, then `tsx_symbols_1.xlsx`, `tsx_symbols_2.xlsx`, and so
//! on. The probe and the write are separate steps, so two exporters racing in
//! the same directory can pick the same name.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_xlsxwriter::{RowNum, Workbook, XlsxError};
use tracing::{debug, info};

use crate::config::Settings;
use crate::directory::SymbolDirectory;
use crate::error::CoreError;
use crate::http_client::HttpClient;
use crate::Ticker;

pub const EXPORT_STEM: &str = "tsx_symbols";
pub const EXPORT_EXTENSION: &str = "xlsx";
pub const SYMBOL_HEADER: &str = "Symbol";

pub struct SymbolExporter {
    directory: SymbolDirectory,
    out_dir: PathBuf,
}

impl SymbolExporter {
    pub fn new(directory: SymbolDirectory, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            directory,
            out_dir: out_dir.into(),
        }
    }

    pub fn from_settings(http_client: Arc<dyn HttpClient>, settings: &Settings) -> Self {
        Self::new(
            SymbolDirectory::from_settings(http_client, settings),
            settings.export_dir.clone(),
        )
    }

    /// Fetch the directory and write it to the first free file name.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Network`] when the directory fetch fails; nothing is written
    /// - [`CoreError::Io`] when the workbook cannot be written
    pub async fn export_all_symbols(&self) -> Result<PathBuf, CoreError> {
        let symbols = self.directory.fetch_symbols().await?;
        let out_dir = self.out_dir.clone();
        let count = symbols.len();

        let path = tokio::task::spawn_blocking(move || -> Result<PathBuf, CoreError> {
            std::fs::create_dir_all(&out_dir)?;
            let path = next_free_path(&out_dir, EXPORT_STEM, EXPORT_EXTENSION);
            write_workbook(&path, &symbols)?;
            Ok(path)
        })
        .await
        .map_err(|e| std::io::Error::other(format!("export task failed: {e}")))??;

        info!(path = %path.display(), count, "exported symbol directory");
        Ok(path)
    }
}

/// First of `stem.ext`, `stem_1.ext`, `stem_2.ext`, ... that does not exist.
pub fn next_free_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let candidate = dir.join(format!("{stem}.{ext}"));
    if !candidate.exists() {
        return candidate;
    }

    let mut n: u64 = 1;
    loop {
        let candidate = dir.join(format!("{stem}_{n}.{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        debug!(path = %candidate.display(), "export name taken");
        n += 1;
    }
}

/// Write one `Symbol` column, header in the first row.
pub fn write_workbook(path: &Path, symbols: &[Ticker]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, SYMBOL_HEADER)?;
    for (index, symbol) in symbols.iter().enumerate() {
        let row = RowNum::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string(row, 0, symbol.as_str())?;
    }

    workbook.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_starts_with_plain_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            next_free_path(dir.path(), EXPORT_STEM, EXPORT_EXTENSION),
            dir.path().join("tsx_symbols.xlsx")
        );
    }

    #[test]
    fn probe_skips_taken_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["tsx_symbols.xlsx", "tsx_symbols_1.xlsx", "tsx_symbols_3.xlsx"] {
            std::fs::write(dir.path().join(name), b"").expect("seed file");
        }

        assert_eq!(
            next_free_path(dir.path(), EXPORT_STEM, EXPORT_EXTENSION),
            dir.path().join("tsx_symbols_2.xlsx")
        );
    }

    #[test]
    fn workbook_is_written_as_xlsx() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.xlsx");
        let symbols = ["RY", "TD", "RY"]
            .into_iter()
            .map(|s| Ticker::parse(s).expect("valid ticker"))
            .collect::<Vec<_>>();

        write_workbook(&path, &symbols).expect("write should succeed");

        let bytes = std::fs::read(&path).expect("read back");
        assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
    }
}
