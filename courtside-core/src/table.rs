//! In-memory tabular record sets and their CSV representation.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::TableError;

/// A rectangular set of records with named columns.
///
/// Cells hold the text the upstream source produced. Nothing is type-inferred,
/// so identifiers such as `0022400061` keep their leading zeros across
/// checkpoint round trips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Create a table, checking that every row has one cell per header.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows (it may still have headers).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), TableError> {
        if row.len() != self.headers.len() {
            return Err(TableError::RowWidth {
                expected: self.headers.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| TableError::missing_column(name))?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Distinct values of one column in first-seen order.
    pub fn unique(&self, name: &str) -> Result<Vec<String>, TableError> {
        let mut seen = std::collections::HashSet::new();
        Ok(self
            .column(name)?
            .into_iter()
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect())
    }

    /// Set `name` to `value` on every row, adding the column if it is absent.
    pub fn set_column(&mut self, name: &str, value: &str) {
        match self.column_index(name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.to_string();
                }
            }
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.to_string());
                }
            }
        }
    }

    /// Drop every column after `name`. Returns false (and leaves the table
    /// untouched) when the column does not exist.
    pub fn truncate_after(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.headers.truncate(idx + 1);
        for row in &mut self.rows {
            row.truncate(idx + 1);
        }
        true
    }

    /// Append the rows of `other`, aligning columns by name.
    ///
    /// Columns only `other` has are added at the end; cells missing on
    /// either side are left empty. Rows are never deduplicated.
    pub fn append(&mut self, other: Table) {
        if self.headers.is_empty() && self.rows.is_empty() {
            *self = other;
            return;
        }

        let mut mapping = Vec::with_capacity(other.headers.len());
        for header in &other.headers {
            let idx = match self.column_index(header) {
                Some(idx) => idx,
                None => {
                    self.headers.push(header.clone());
                    for row in &mut self.rows {
                        row.push(String::new());
                    }
                    self.headers.len() - 1
                }
            };
            mapping.push(idx);
        }

        let width = self.headers.len();
        for row in other.rows {
            let mut aligned = vec![String::new(); width];
            for (cell, &idx) in row.into_iter().zip(&mapping) {
                aligned[idx] = cell;
            }
            self.rows.push(aligned);
        }
    }

    /// Concatenate tables in order (see [`Table::append`]).
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Table {
        let mut out = Table::default();
        for table in tables {
            out.append(table);
        }
        out
    }

    /// Read a CSV file whose first line is the header row.
    pub fn read_csv(path: &Path) -> Result<Self, TableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = Self::new(headers);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(str::to_string).collect())?;
        }
        Ok(table)
    }

    /// Write the table as CSV, replacing any existing file.
    pub fn write_csv(&self, path: &Path) -> Result<(), TableError> {
        let file = std::fs::File::create(path)?;
        self.to_writer(file)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut writer = csv::Writer::from_writer(writer);
        if !self.headers.is_empty() {
            writer.write_record(&self.headers)?;
        }
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::from_rows(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut t = table(&["A", "B"], &[]);
        let err = t.push_row(vec!["1".into()]).unwrap_err();
        assert!(matches!(err, TableError::RowWidth { expected: 2, actual: 1 }));
    }

    #[test]
    fn set_column_adds_or_overwrites() {
        let mut t = table(&["PLAYER_ID"], &[&["1"], &["2"]]);
        t.set_column("GAME_ID", "0022400061");
        assert_eq!(t.headers(), ["PLAYER_ID", "GAME_ID"]);
        assert_eq!(t.column("GAME_ID").unwrap(), vec!["0022400061", "0022400061"]);

        t.set_column("GAME_ID", "x");
        assert_eq!(t.headers().len(), 2);
        assert_eq!(t.column("GAME_ID").unwrap(), vec!["x", "x"]);
    }

    #[test]
    fn append_aligns_columns_by_name() {
        let mut a = table(&["A", "B"], &[&["1", "2"]]);
        let b = table(&["B", "C"], &[&["3", "4"]]);
        a.append(b);
        assert_eq!(a.headers(), ["A", "B", "C"]);
        assert_eq!(a.rows()[0], vec!["1", "2", ""]);
        assert_eq!(a.rows()[1], vec!["", "3", "4"]);
    }

    #[test]
    fn append_keeps_duplicate_rows() {
        let a = table(&["A"], &[&["1"]]);
        let out = Table::concat(vec![a.clone(), a]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn unique_preserves_first_seen_order() {
        let t = table(&["ID"], &[&["b"], &["a"], &["b"], &["c"]]);
        assert_eq!(t.unique("ID").unwrap(), vec!["b", "a", "c"]);
        assert!(matches!(t.unique("NOPE"), Err(TableError::MissingColumn(_))));
    }

    #[test]
    fn truncate_after_named_column() {
        let mut t = table(&["A", "B", "C"], &[&["1", "2", "3"]]);
        assert!(t.truncate_after("B"));
        assert_eq!(t.headers(), ["A", "B"]);
        assert_eq!(t.rows()[0], vec!["1", "2"]);
        assert!(!t.truncate_after("Z"));
    }

    #[test]
    fn csv_round_trip_keeps_leading_zeros() {
        let t = table(&["GAME_ID", "NAME"], &[&["0022400061", "Smith, J"]]);
        let mut buf = Vec::new();
        t.to_writer(&mut buf).unwrap();
        let back = Table::from_reader(buf.as_slice()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn write_csv_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        table(&["A"], &[&["1"], &["2"]]).write_csv(&path).unwrap();
        table(&["A"], &[&["3"]]).write_csv(&path).unwrap();

        let back = Table::read_csv(&path).unwrap();
        assert_eq!(back.column("A").unwrap(), vec!["3"]);
    }
}
