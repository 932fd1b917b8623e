//! CSV export of loaded rows and CSV import for bulk creation.
//!
//! Each entity declares a fixed list of columns for export and a fixed list
//! of fields an import may contain. Export writes exactly the declared
//! columns, whatever else the record carries.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumn {
    /// Header text.
    pub label: &'static str,
    /// Field the cell is read from.
    pub key: &'static str,
}

pub const fn column(label: &'static str, key: &'static str) -> CsvColumn {
    CsvColumn { label, key }
}

/// A record that can be flattened into export cells.
pub trait CsvRecord {
    /// Cell text for `key`. Unknown keys and missing values are empty.
    fn csv_field(&self, key: &str) -> String;
}

/// One parsed import row, ready to post to a bulk-create endpoint.
pub type ImportRow = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("Could not read the CSV file: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not write the CSV file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output was not valid text")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("Unknown column \"{0}\" in CSV file")]
    UnknownField(String),
    #[error("The CSV file has no rows")]
    Empty,
}

/// Write `records` as CSV with one column per entry of `columns`.
pub fn export_csv<R: CsvRecord>(
    records: &[R],
    columns: &[CsvColumn],
) -> Result<String, CsvError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|c| c.label))?;
    for record in records {
        writer.write_record(columns.iter().map(|c| record.csv_field(c.key)))?;
    }
    finish(writer)
}

/// Header-only file users fill in before importing.
pub fn template_csv(fields: &[&str]) -> Result<String, CsvError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(fields)?;
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, CsvError> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Parse an uploaded CSV into rows keyed by header.
///
/// Every header must be one of `allowed`. Blank cells are left out of the
/// row so the backend applies its defaults; `true`/`false` become booleans
/// and everything else stays text.
pub fn parse_import(
    text: &str,
    allowed: &[&str],
) -> Result<Vec<ImportRow>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if let Some(unknown) = headers.iter().find(|h| !allowed.contains(h)) {
        return Err(CsvError::UnknownField(unknown.to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if cell.is_empty() {
                continue;
            }
            let value = match cell {
                "true" | "TRUE" => Value::Bool(true),
                "false" | "FALSE" => Value::Bool(false),
                _ => Value::String(cell.to_string()),
            };
            row.insert(header.to_string(), value);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return Err(CsvError::Empty);
    }
    Ok(rows)
}

/// Cell text helpers for [`CsvRecord`] impls.
pub fn cell<T: ToString>(value: &T) -> String {
    value.to_string()
}

pub fn opt_cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

pub fn list_cell<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        id: i64,
        name: String,
        secret: String,
    }

    impl CsvRecord for Person {
        fn csv_field(&self, key: &str) -> String {
            match key {
                "id" => cell(&self.id),
                "name" => self.name.clone(),
                "secret" => self.secret.clone(),
                _ => String::new(),
            }
        }
    }

    const COLUMNS: &[CsvColumn] = &[column("id", "id"), column("full name", "name")];

    #[test]
    fn export_writes_only_declared_columns() {
        let people = [
            Person {
                id: 1,
                name: "Ann, Jr".into(),
                secret: "hunter2".into(),
            },
            Person {
                id: 2,
                name: "Bo".into(),
                secret: "x".into(),
            },
        ];
        let out = export_csv(&people, COLUMNS).unwrap();
        assert_eq!(out, "id,full name\n1,\"Ann, Jr\"\n2,Bo\n");
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn export_with_no_rows_is_just_a_header() {
        let out = export_csv::<Person>(&[], COLUMNS).unwrap();
        assert_eq!(out, "id,full name\n");
    }

    #[test]
    fn import_checks_headers() {
        let err = parse_import("name,salary\nAnn,10\n", &["name"]).unwrap_err();
        assert!(matches!(err, CsvError::UnknownField(f) if f == "salary"));
    }

    #[test]
    fn import_rows() {
        let text = "date,occasion,paid\n2024-01-01, New year ,true\n2024-05-01,,false\n,,\n";
        let rows = parse_import(text, &["date", "occasion", "paid"]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["occasion"], Value::String("New year".into()));
        assert_eq!(rows[0]["paid"], Value::Bool(true));
        assert!(!rows[1].contains_key("occasion"));
    }

    #[test]
    fn import_without_rows_fails() {
        assert!(matches!(
            parse_import("date,occasion\n", &["date", "occasion"]),
            Err(CsvError::Empty)
        ));
    }
}
