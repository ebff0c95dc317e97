use crate::error::RustyTableError;
use crate::spreadsheet::CellGrid;
use crate::table::field::TableDefinition;
use crate::table::locator::scan;
use crate::table::locator::TableLocation;
use crate::table::records::IterOptions;
use crate::table::records::RecordIterator;
use crate::table::records::Value;
use std::cell::OnceCell;
use std::collections::BTreeMap;

/// Reads one table out of a set of sheets.
///
/// The table is searched on first use and the location is cached until [`TableReader::relocate`].
pub struct TableReader<'g, G: CellGrid> {
    sheets: &'g [G],
    definition: TableDefinition,
    location: OnceCell<Option<TableLocation>>,
}

impl<'g, G: CellGrid> TableReader<'g, G> {
    /// # Errors
    ///
    /// Fails with [`RustyTableError::NoSheets`] when `sheets` is empty.
    pub fn new(sheets: &'g [G], definition: TableDefinition) -> Result<Self, RustyTableError> {
        if sheets.is_empty() {
            Err(RustyTableError::NoSheets)?
        }
        Ok(Self {
            sheets,
            definition,
            location: OnceCell::new(),
        })
    }

    pub fn definition(&self) -> &TableDefinition {
        &self.definition
    }

    /// Searches the table if needed and returns the cached location.
    pub fn find_table(&self) -> Option<&TableLocation> {
        self.location
            .get_or_init(|| scan(self.sheets, self.definition.fields()))
            .as_ref()
    }

    /// Snapshot of the table location, `None` when no header row matches.
    pub fn location(&self) -> Option<TableLocation> {
        self.find_table().cloned()
    }

    /// Drops the cached location and searches again.
    pub fn relocate(&mut self) -> Option<&TableLocation> {
        self.location = OnceCell::new();
        self.find_table()
    }

    /// Sheet holding the table.
    pub fn sheet(&self) -> Option<&'g G> {
        let sheets = self.sheets;
        self.find_table().map(|location| &sheets[location.sheet])
    }

    /// Number of rows below the header up to the sheet's last row, zero without a table.
    pub fn record_count(&self) -> usize {
        self.find_table().map(TableLocation::record_count).unwrap_or_default()
    }

    /// Starts a fresh iterator over the table's records.
    ///
    /// # Errors
    ///
    /// Fails with [`RustyTableError::TableNotFound`] when no header row matches.
    pub fn iter(&self, options: IterOptions) -> Result<RecordIterator<'_, G>, RustyTableError> {
        let location = self.find_table().ok_or(RustyTableError::TableNotFound)?;
        let sheet = &self.sheets[location.sheet];
        Ok(RecordIterator::new(sheet, location, self.definition.fields(), options))
    }

    /// Reads all records keyed by field name, with default options.
    pub fn all_as_mappings(&self) -> Result<Vec<BTreeMap<String, Value>>, RustyTableError> {
        let options = IterOptions {
            as_mapping: true,
            ..IterOptions::default()
        };
        self.iter(options)?
            .map(|record| -> Result<_, RustyTableError> { Ok(record?.into_mapping().unwrap_or_default()) })
            .collect()
    }

    /// Reads all records as sequences in field declaration order, with default options.
    pub fn all_as_sequences(&self) -> Result<Vec<Vec<Value>>, RustyTableError> {
        self.iter(IterOptions::default())?
            .map(|record| -> Result<_, RustyTableError> { Ok(record?.into_sequence().unwrap_or_default()) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::Criteria;
    use crate::spreadsheet::Sheet;
    use crate::spreadsheet::XlsxSpreadsheet;
    use crate::table::field::FieldSpec;
    use crate::table::field::Validator;
    use crate::table::ExtractionError;

    fn definition() -> TableDefinition {
        TableDefinition::new(vec![
            FieldSpec::new("id").required(true).validator(Validator::Integer),
            FieldSpec::new("name"),
        ])
        .unwrap()
    }

    fn ledger() -> Sheet {
        let mut rows = vec![vec!["Ledger".to_string()], vec![], vec!["ID".to_string(), "Name".to_string()]];
        for id in 1..=8 {
            let id = if id == 6 { "six".to_string() } else { id.to_string() };
            rows.push(vec![id, "x".to_string()]);
        }
        Sheet::from_rows("Ledger", rows)
    }

    #[test]
    fn reader_requires_sheets() {
        let sheets: Vec<Sheet> = vec![];
        assert!(matches!(TableReader::new(&sheets, definition()), Err(RustyTableError::NoSheets)));
    }

    #[test]
    fn reader_location_and_count() {
        let sheets = [Sheet::from_rows("Cover", [vec!["Title"]]), ledger()];
        let reader = TableReader::new(&sheets, definition()).unwrap();

        let location = reader.location().unwrap();
        assert_eq!(location.sheet, 1);
        assert_eq!(location.header_row, 2);
        assert_eq!(location.max_row, 10);
        assert_eq!(reader.record_count(), 8);
        assert_eq!(reader.sheet().unwrap().name, "Ledger");
        assert_eq!(reader.find_table(), Some(&location));
    }

    #[test]
    fn reader_relocate_is_idempotent() {
        let sheets = [ledger()];
        let mut reader = TableReader::new(&sheets, definition()).unwrap();
        let first = reader.location();
        assert_eq!(reader.relocate().cloned(), first);
    }

    #[test]
    fn reader_bulk_helpers() {
        let sheets = [Sheet::from_rows("Data", [vec!["Name", "ID"], vec!["a", "1"], vec!["b", "2"]])];
        let reader = TableReader::new(&sheets, definition()).unwrap();

        assert_eq!(
            reader.all_as_sequences().unwrap(),
            vec![
                vec![Some("1".to_string()), Some("a".to_string())],
                vec![Some("2".to_string()), Some("b".to_string())],
            ]
        );
        let mappings = reader.all_as_mappings().unwrap();
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[1]["name"], Some("b".to_string()));
    }

    #[test]
    fn reader_bulk_helpers_fail_on_invalid_value() {
        let sheets = [ledger()];
        let reader = TableReader::new(&sheets, definition()).unwrap();

        let error = reader.all_as_sequences().unwrap_err();
        assert!(matches!(
            error,
            RustyTableError::ExtractionError(ExtractionError { ref reference, .. }) if reference == "A9"
        ));
        assert_eq!(error.to_string(), "Invalid value 'six' for field 'id' at A9");
    }

    #[test]
    fn reader_without_table() {
        let sheets = [Sheet::from_rows("Data", [vec!["Name"], vec!["a"]])];
        let reader = TableReader::new(&sheets, definition()).unwrap();

        assert_eq!(reader.location(), None);
        assert_eq!(reader.record_count(), 0);
        assert!(matches!(reader.iter(IterOptions::default()), Err(RustyTableError::TableNotFound)));
        assert!(matches!(reader.all_as_mappings(), Err(RustyTableError::TableNotFound)));
    }

    #[test]
    fn reader_iterators_are_independent() {
        let sheets = [ledger()];
        let reader = TableReader::new(&sheets, definition()).unwrap();
        let mut first = reader.iter(IterOptions::default()).unwrap();
        let mut second = reader.iter(IterOptions::default()).unwrap();

        first.next();
        first.next();
        assert_eq!(first.row(), 4);
        assert_eq!(second.next().unwrap().unwrap().into_sequence().unwrap()[0], Some("1".to_string()));
        assert_eq!(second.row(), 3);
    }

    #[test]
    fn reader_over_xlsx_workbook() {
        let bytes = crate::spreadsheet::xlsx::tests::workbook_bytes();
        let sheets = XlsxSpreadsheet::from_reader("memory.xlsx", std::io::Cursor::new(bytes))
            .unwrap()
            .read_sheets(&Criteria::default())
            .unwrap();
        let definition = TableDefinition::new(vec![
            FieldSpec::new("name").required(true),
            FieldSpec::new("born").validator(Validator::Date),
        ])
        .unwrap();
        let reader = TableReader::new(&sheets, definition).unwrap();

        let location = reader.location().unwrap();
        assert_eq!(location.sheet_name, "Data");
        assert_eq!(location.header_row, 1);
        assert_eq!(location.column_of("name"), Some(1));
        assert_eq!(location.column_of("born"), Some(2));
        assert_eq!(
            reader.all_as_sequences().unwrap(),
            vec![
                vec![Some("Ada Lovelace".to_string()), Some("2024-01-01".to_string())],
                vec![Some("Tom & Jerry".to_string()), Some("2024-01-01 12:00:00".to_string())],
            ]
        );
    }
}
