use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mockseed_core::Record;

use crate::errors::GenerationError;
use crate::output::atomic::{ensure_parent, temp_path};

/// Write `rows` under a fixed header and return the number of bytes written.
///
/// The file is staged next to `path` and renamed into place once complete.
pub fn write_table_csv<R: Record>(
    path: &Path,
    columns: &[&str],
    rows: &[R],
) -> Result<u64, GenerationError> {
    ensure_parent(path)?;
    let tmp_path = temp_path(path)?;

    let result = write_rows(&tmp_path, columns, rows);
    match result {
        Ok(bytes) => {
            std::fs::rename(&tmp_path, path)?;
            Ok(bytes)
        }
        Err(err) => {
            let _ = std::fs::remove_file(&tmp_path);
            Err(err)
        }
    }
}

fn write_rows<R: Record>(
    path: &Path,
    columns: &[&str],
    rows: &[R],
) -> Result<u64, GenerationError> {
    let writer = BufWriter::new(File::create(path)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(counting);

    writer.write_record(columns)?;
    for row in rows {
        let values = row.values();
        if values.len() != columns.len() {
            return Err(GenerationError::invalid_argument(format!(
                "row has {} fields but {} columns were declared",
                values.len(),
                columns.len()
            )));
        }
        writer.write_record(&values)?;
    }

    writer.flush()?;
    let mut counting = writer.into_inner().map_err(|err| err.into_error())?;
    counting.flush()?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
