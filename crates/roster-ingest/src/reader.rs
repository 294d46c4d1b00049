//! CSV file reading.
//!
//! The first record is the header row. Every cell is kept as text, blank
//! cells included; numeric interpretation happens later in the validators.

use std::fs;
use std::path::Path;

use roster_model::{CellValue, Row};

use crate::error::{IngestError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Read a CSV file into rows keyed by header name.
///
/// Records shorter than the header leave the trailing columns absent; extra
/// trailing fields are ignored.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let rows = parse_rows(&bytes, path)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Read CSV");
    Ok(rows)
}

/// Parse CSV content already in memory. `path` is only used for errors.
pub fn parse_rows(bytes: &[u8], path: &Path) -> Result<Vec<Row>> {
    let content = strip_bom(bytes, path)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content);

    let headers = reader
        .headers()
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let columns = header_names(&headers, path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;

        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, field)| (column.clone(), CellValue::from(field)))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Reject UTF-16 input and drop a UTF-8 byte-order mark.
fn strip_bom<'a>(bytes: &'a [u8], path: &Path) -> Result<&'a [u8]> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    Ok(bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes))
}

fn header_names(headers: &csv::StringRecord, path: &Path) -> Result<Vec<String>> {
    let mut columns = Vec::with_capacity(headers.len());
    for (index, header) in headers.iter().enumerate() {
        let name = header.trim();
        if name.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                position: index + 1,
            });
        }
        if columns.iter().any(|existing| existing == name) {
            tracing::warn!(path = %path.display(), column = name, "Duplicate column name - last value wins");
        }
        columns.push(name.to_string());
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::text_of;

    #[test]
    fn test_utf8_bom_is_stripped() {
        let rows = parse_rows(b"\xEF\xBB\xBFClientID,PriorityLevel\nC1,3\n", Path::new("c.csv")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(text_of(&rows[0], "ClientID"), "C1");
    }

    #[test]
    fn test_utf16_is_rejected() {
        let err = parse_rows(b"\xFF\xFEC\x00", Path::new("c.csv")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }

    #[test]
    fn test_cells_stay_text() {
        let rows = parse_rows(b"A,B,C\n5,,x\n", Path::new("t.csv")).unwrap();
        assert_eq!(rows[0].get("A"), Some(&CellValue::from("5")));
        assert_eq!(rows[0].get("B"), Some(&CellValue::from("")));
    }
}
