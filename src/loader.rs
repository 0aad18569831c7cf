//! CSV loading for the weekly production table.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::record::WeekRecord;

/// Deserializes production rows from any CSV reader. Columns beyond the
/// ones [`WeekRecord`] names are ignored.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<WeekRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: WeekRecord = result?;
        rows.push(record);
    }

    Ok(rows)
}

/// Loads the production table from a CSV file on disk.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<WeekRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("opening production table {}", path.display()))?;

    read_records(file)
}
