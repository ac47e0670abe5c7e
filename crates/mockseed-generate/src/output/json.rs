use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::errors::GenerationError;
use crate::output::atomic::write_bytes_atomic;

/// Serialize `value` as JSON indented with four spaces and write it atomically.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<u64, GenerationError> {
    let mut data = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut data, formatter);
    value.serialize(&mut serializer)?;
    write_bytes_atomic(path, &data)?;
    Ok(data.len() as u64)
}
