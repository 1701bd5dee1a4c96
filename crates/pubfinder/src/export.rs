//! CSV output for [`PaperRecord`]s.
//!
//! The header row is always written, so an empty result set produces a file with only the
//! header. List fields are joined with `", "` and quoted by the writer where needed.

use std::io::Write;

use super::*;
use crate::record::CSV_HEADERS;

/// Writes `records` as CSV, header first, to any writer.
pub fn write_csv<W: Write>(records: &[PaperRecord], writer: W) -> Result<()> {
  let mut writer = csv::Writer::from_writer(writer);
  writer.write_record(CSV_HEADERS)?;
  for record in records {
    writer.write_record(record.to_row())?;
  }
  writer.flush()?;
  Ok(())
}

/// Writes `records` as CSV to the file at `path`, replacing any existing file.
///
/// The records are rendered in memory first, so a file is only created once there is something
/// complete to write.
pub fn write_csv_file(records: &[PaperRecord], path: impl AsRef<Path>) -> Result<PathBuf> {
  let path = path.as_ref();
  let mut buf = Vec::new();
  write_csv(records, &mut buf)?;
  std::fs::write(path, buf)?;
  debug!("Wrote {} records to {}", records.len(), path.display());
  Ok(path.to_path_buf())
}
