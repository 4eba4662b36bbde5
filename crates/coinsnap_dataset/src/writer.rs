use crate::error::DatasetError;
use crate::row::{COLUMNS, Row};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Parts of the snapshot file name, joined with underscores.
#[derive(Debug, Clone)]
pub struct SnapshotName<'a> {
    pub prefix: &'a str,
    pub to_symbol: &'a str,
    pub exchange: &'a str,
    pub interval: &'a str,
    pub date: NaiveDate,
}

impl SnapshotName<'_> {
    pub fn filename(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}.csv",
            self.prefix,
            self.to_symbol,
            self.exchange,
            self.interval,
            self.date.format("%Y-%m-%d")
        )
    }
}

/// Writes the header and then every row. The header is written even when
/// there are no rows.
pub fn write_csv<W: Write>(writer: W, rows: &[Row]) -> Result<(), DatasetError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Creates (or truncates) `<dir>/<name>` and writes the table into it.
pub fn write_snapshot(
    dir: &Path,
    name: &SnapshotName<'_>,
    rows: &[Row],
) -> Result<PathBuf, DatasetError> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }

    let path = dir.join(name.filename());
    let file = File::create(&path)?;
    write_csv(file, rows)?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "snapshot written");
    Ok(path)
}
