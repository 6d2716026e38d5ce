//! CSV persistence.
//!
//! RULE: only output.rs touches the filesystem. Files are written as one
//! whole buffer; a failed write aborts the run with no cleanup.

use crate::{
    error::{GenError, GenResult},
    record::{OrderRecord, COLUMNS},
};
use std::{fs, path::Path};

/// Serialize rows to UTF-8 CSV with the 39-column header.
pub fn to_csv_bytes(rows: &[OrderRecord]) -> GenResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        // serde only emits the header alongside the first record.
        writer.write_record(COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| GenError::Io(e.into_error()))
}

pub fn write_csv(path: impl AsRef<Path>, rows: &[OrderRecord]) -> GenResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let bytes = to_csv_bytes(rows)?;
    fs::write(path, &bytes)?;
    log::info!("wrote {} rows ({} bytes) to {}", rows.len(), bytes.len(), path.display());
    Ok(())
}

pub fn read_csv_bytes(bytes: &[u8]) -> GenResult<Vec<OrderRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let record: OrderRecord = row?;
        rows.push(record);
    }
    Ok(rows)
}

pub fn read_csv(path: impl AsRef<Path>) -> GenResult<Vec<OrderRecord>> {
    let bytes = fs::read(path)?;
    read_csv_bytes(&bytes)
}
