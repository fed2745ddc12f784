use crate::output::CategoryRecord;
use crate::WikitreeError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// File name holding the records of one language key
pub fn data_file_name(language: &str) -> String {
    format!("data_{}.json", language)
}

/// Writes the records of one crawl as pretty-printed JSON
///
/// Non-ASCII text is written as-is, not escaped.
pub fn write_records(path: &Path, records: &[CategoryRecord]) -> Result<(), WikitreeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;

    tracing::info!("Wrote {} categories to {}", records.len(), path.display());
    Ok(())
}

/// Reads records previously written by [`write_records`]
pub fn read_records(path: &Path) -> Result<Vec<CategoryRecord>, WikitreeError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
