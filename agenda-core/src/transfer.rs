//! Backup files for exporting and importing agenda collections.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::AgendaResult;
use crate::store::AgendaStore;

/// File name for a backup taken on `date`: `agenda_backup_YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("agenda_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Write the store's export into `dir`, returning the written path.
pub async fn write_export(store: &AgendaStore, dir: &Path, date: NaiveDate) -> AgendaResult<PathBuf> {
    let bytes = store.export_all()?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(date));
    tokio::fs::write(&path, bytes).await?;

    Ok(path)
}

/// Merge the records in the file at `path` into the store.
pub async fn read_import(store: &AgendaStore, path: &Path) -> AgendaResult<usize> {
    let bytes = tokio::fs::read(path).await?;
    store.import_merge(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(export_file_name(date), "agenda_backup_2025-01-09.json");
    }
}
