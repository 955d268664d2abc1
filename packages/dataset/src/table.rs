//! An in-memory table of nullable string columns.

use std::io::{Read, Write};
use std::path::Path;

use crate::DatasetError;

/// A named column of nullable cells.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Column {
    name: String,
    values: Vec<Option<String>>,
}

/// Ordered named columns of equal length. Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Creates a table with no columns.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DuplicateColumn`] if the name is taken, or
    /// [`DatasetError::RowCountMismatch`] if the length differs from the
    /// existing columns.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<String>>,
    ) -> Result<Self, DatasetError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(DatasetError::DuplicateColumn(name));
        }
        self.check_len(&name, values.len())?;
        self.columns.push(Column { name, values });
        Ok(self)
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns `true` if a column named `name` exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// The cells of column `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ColumnNotFound`] if there is no such column.
    pub fn column(&self, name: &str) -> Result<&[Option<String>], DatasetError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| DatasetError::ColumnNotFound(name.to_string()))
    }

    /// Replaces column `name`, or appends it if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::RowCountMismatch`] if the length differs
    /// from the table's row count.
    pub fn set_column(
        &mut self,
        name: &str,
        values: Vec<Option<String>>,
    ) -> Result<(), DatasetError> {
        self.check_len(name, values.len())?;
        if let Some(idx) = self.columns.iter().position(|c| c.name == name) {
            self.columns[idx].values = values;
        } else {
            self.columns.push(Column {
                name: name.to_string(),
                values,
            });
        }
        Ok(())
    }

    /// Reads a CSV with a header row. Empty fields load as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed or has repeated headers.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new().flexible(false).from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

        for record in reader.records() {
            let record = record?;
            for (values, field) in columns.iter_mut().zip(record.iter()) {
                values.push((!field.is_empty()).then(|| field.to_string()));
            }
        }

        let mut table = Self::new();
        for (name, values) in headers.into_iter().zip(columns) {
            table = table.with_column(name, values)?;
        }

        log::debug!(
            "Read {} rows x {} columns",
            table.row_count(),
            table.columns.len()
        );

        Ok(table)
    }

    /// Reads a CSV file. See [`Self::from_csv_reader`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::from_csv_reader(std::fs::File::open(path)?)
    }

    /// Writes the table as CSV with a header row. Missing cells are
    /// written as empty fields.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), DatasetError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(self.column_names())?;
        for row in 0..self.row_count() {
            writer.write_record(
                self.columns
                    .iter()
                    .map(|c| c.values[row].as_deref().unwrap_or_default()),
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    fn check_len(&self, name: &str, len: usize) -> Result<(), DatasetError> {
        if self.columns.is_empty() || len == self.row_count() {
            Ok(())
        } else {
            Err(DatasetError::RowCountMismatch {
                column: name.to_string(),
                expected: self.row_count(),
                actual: len,
            })
        }
    }
}

/// Converts string slices into present cells.
#[cfg(test)]
pub(crate) fn cells<S: AsRef<str>>(values: &[S]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.as_ref().to_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_columns_of_equal_length() {
        let table = Table::new()
            .with_column("a", cells(&["1", "2"]))
            .unwrap()
            .with_column("b", vec![None, Some("x".to_string())])
            .unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(table.column("b").unwrap()[1].as_deref(), Some("x"));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = Table::new()
            .with_column("a", cells(&["1", "2"]))
            .unwrap()
            .with_column("b", cells(&["1"]));
        assert!(matches!(
            result,
            Err(DatasetError::RowCountMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let result = Table::new()
            .with_column("a", cells(&["1"]))
            .unwrap()
            .with_column("a", cells(&["2"]));
        assert!(matches!(result, Err(DatasetError::DuplicateColumn(name)) if name == "a"));
    }

    #[test]
    fn missing_column_is_an_error() {
        assert!(matches!(
            Table::new().column("nope"),
            Err(DatasetError::ColumnNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn set_column_replaces_or_appends() {
        let mut table = Table::new().with_column("a", cells(&["1"])).unwrap();
        table.set_column("a", cells(&["2"])).unwrap();
        table.set_column("b", vec![None]).unwrap();
        assert_eq!(table.column("a").unwrap(), [Some("2".to_string())]);
        assert_eq!(table.column("b").unwrap(), [None]);
        assert!(table.set_column("c", vec![None, None]).is_err());
    }

    #[test]
    fn replacing_the_only_column_keeps_the_row_count() {
        let mut table = Table::new().with_column("a", cells(&["1", "2"])).unwrap();
        assert!(matches!(
            table.set_column("a", cells(&["1"])),
            Err(DatasetError::RowCountMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn reads_csv_with_missing_cells() {
        let csv = "ADDRESS,CITY\ncalle mayor,madrid\n,getafe\n";
        let table = Table::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("ADDRESS").unwrap(),
            [Some("calle mayor".to_string()), None]
        );
    }

    #[test]
    fn reads_header_only_csv() {
        let table = Table::from_csv_reader("ADDRESS\n".as_bytes()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert!(table.has_column("ADDRESS"));
    }

    #[test]
    fn writes_csv() {
        let table = Table::new()
            .with_column("ADDRESS", vec![Some("calle, 1".to_string()), None])
            .unwrap();
        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ADDRESS\n\"calle, 1\"\n\"\"\n");
    }
}
