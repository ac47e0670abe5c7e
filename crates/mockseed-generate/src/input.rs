use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::errors::GenerationError;

/// A CSV file loaded with trimmed headers and values.
#[derive(Debug, Clone)]
pub struct InputTable {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl InputTable {
    pub fn open(path: &Path) -> Result<Self, GenerationError> {
        if !path.exists() {
            return Err(GenerationError::InputNotFound(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();
        if headers.iter().all(String::is_empty) {
            return Err(GenerationError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of `column`, matched case-insensitively.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(column))
    }

    pub fn require_column(&self, column: &str) -> Result<usize, GenerationError> {
        self.column_index(column)
            .ok_or_else(|| GenerationError::MissingColumn {
                column: column.to_string(),
                path: self.path.clone(),
                headers: self.headers.clone(),
            })
    }

    /// Cell value for every row, empty string when the row is short.
    pub fn cells(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(str::trim).unwrap_or_default())
    }

    /// Non-empty values of the column at `index`, in file order.
    pub fn values(&self, index: usize) -> Vec<String> {
        self.cells(index)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Read the non-empty values of a required column; at least one must exist.
pub fn read_required_ids(path: &Path, column: &str) -> Result<Vec<String>, GenerationError> {
    let table = InputTable::open(path)?;
    let index = table.require_column(column)?;
    let ids = table.values(index);
    if ids.is_empty() {
        return Err(GenerationError::EmptyColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(ids)
}

/// Read a column that may be absent: a missing file, header or column yields
/// an empty list.
pub fn read_optional_ids(path: &Path, column: &str) -> Result<Vec<String>, GenerationError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let table = match InputTable::open(path) {
        Ok(table) => table,
        Err(GenerationError::MissingHeader { .. }) => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };
    Ok(table
        .column_index(column)
        .map(|index| table.values(index))
        .unwrap_or_default())
}

/// Read a required column and parse every value as an integer.
pub fn read_integer_ids(path: &Path, column: &str) -> Result<Vec<i64>, GenerationError> {
    read_required_ids(path, column)?
        .into_iter()
        .map(|value| {
            value
                .parse::<i64>()
                .map_err(|_| GenerationError::InvalidValue {
                    column: column.to_string(),
                    value,
                    path: path.to_path_buf(),
                })
        })
        .collect()
}

/// A team row as needed by the venue generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSchool {
    pub team_id: String,
    pub school: String,
}

/// Read `team_id` and `team_school`, skipping rows without a team id.
pub fn read_team_schools(path: &Path) -> Result<Vec<TeamSchool>, GenerationError> {
    let table = InputTable::open(path)?;
    let id_index = table.require_column("team_id")?;
    let school_index = table.require_column("team_school")?;

    Ok(table
        .cells(id_index)
        .zip(table.cells(school_index))
        .filter(|(team_id, _)| !team_id.is_empty())
        .map(|(team_id, school)| TeamSchool {
            team_id: team_id.to_string(),
            school: school.to_string(),
        })
        .collect())
}
