use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::errors::GenerationError;
use crate::output::json::write_json_pretty;

/// Outcome of a CSV to JSON conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
}

impl std::fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Conversion successful! Data from '{}' saved to '{}'.",
            self.input.display(),
            self.output.display()
        )
    }
}

/// Convert a headed CSV file into a JSON array with one object per row.
///
/// Keys keep header order; cells missing from short rows become `null`.
pub fn convert_csv_to_json(
    input: &Path,
    output: &Path,
) -> Result<ConversionSummary, GenerationError> {
    if !input.exists() {
        return Err(GenerationError::InputNotFound(input.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(input)?;
    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

    write_json_pretty(
        output,
        &JsonRows {
            headers: &headers,
            rows: &rows,
        },
    )?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        rows = rows.len(),
        "csv converted to json"
    );

    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        rows: rows.len(),
    })
}

struct JsonRows<'a> {
    headers: &'a StringRecord,
    rows: &'a [StringRecord],
}

impl Serialize for JsonRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows {
            seq.serialize_element(&JsonRow {
                headers: self.headers,
                row,
            })?;
        }
        seq.end()
    }
}

struct JsonRow<'a> {
    headers: &'a StringRecord,
    row: &'a StringRecord,
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (idx, header) in self.headers.iter().enumerate() {
            map.serialize_entry(header, &self.row.get(idx))?;
        }
        map.end()
    }
}
