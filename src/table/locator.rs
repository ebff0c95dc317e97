//! Top-down search for the header row of a table across several sheets.
use crate::error::RustyTableError;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::CellGrid;
use crate::table::field::FieldSpec;
use crate::table::resolver::resolve;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Where a table was found and which column holds each field.
///
/// Rows and columns are zero-based and bounds are inclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableLocation {
    /// Index of the sheet in the searched slice
    pub sheet: usize,
    pub sheet_name: String,
    pub header_row: usize,
    /// First data row, always `header_row + 1`
    pub min_row: usize,
    /// Last row of the sheet; trailing rows may be blank or unrelated
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
    /// Field name -> column index, one entry per resolved field
    pub field_col: BTreeMap<String, usize>,
}

impl TableLocation {
    fn new(sheet: usize, sheet_name: &str, header_row: usize, max_row: usize, field_col: HashMap<String, usize>) -> Self {
        let min_col = field_col.values().copied().min().unwrap_or_default();
        let max_col = field_col.values().copied().max().unwrap_or_default();
        Self {
            sheet,
            sheet_name: sheet_name.to_owned(),
            header_row,
            min_row: header_row + 1,
            max_row,
            min_col,
            max_col,
            field_col: field_col.into_iter().collect(),
        }
    }

    /// Number of rows between the header and the sheet's last row.
    pub fn record_count(&self) -> usize {
        (self.max_row + 1).saturating_sub(self.min_row)
    }

    pub fn column_of(&self, field: &str) -> Option<usize> {
        self.field_col.get(field).copied()
    }

    /// A1 reference of the area spanned by the header and data rows, e.g. `B3:E10`.
    pub fn reference(&self) -> String {
        format!(
            "{}:{}",
            index_to_reference(self.header_row, self.min_col),
            index_to_reference(self.max_row.max(self.header_row), self.max_col)
        )
    }
}

/// Logical OR of all header patterns, tested the same way column resolution tests them.
fn is_header_cell(fields: &[FieldSpec], value: &str) -> bool {
    fields.iter().any(|field| field.header.test(value))
}

/// Searches the sheets for the first row that resolves to a column assignment of the fields.
///
/// Rows are visited by ascending index; at each index every sheet holding that row is visited
/// in slice order before moving on, so a table near the top of a later sheet wins over one
/// further down an earlier sheet.
///
/// # Errors
///
/// Fails on an empty slice of sheets. A table that cannot be found is `Ok(None)`.
pub fn locate<G: CellGrid>(sheets: &[G], fields: &[FieldSpec]) -> Result<Option<TableLocation>, RustyTableError> {
    if sheets.is_empty() {
        Err(RustyTableError::NoSheets)?
    }
    Ok(scan(sheets, fields))
}

pub(crate) fn scan<G: CellGrid>(sheets: &[G], fields: &[FieldSpec]) -> Option<TableLocation> {
    let num_required = fields.iter().filter(|field| field.required).count();
    let bounds: Vec<_> = sheets
        .iter()
        .map(|sheet| sheet.row_range().zip(sheet.col_range()))
        .collect();
    let first_row = bounds.iter().flatten().map(|((first, _), _)| *first).min()?;
    let last_row = bounds.iter().flatten().map(|((_, last), _)| *last).max()?;

    for row in first_row..=last_row {
        for (index, (sheet, bound)) in sheets.iter().zip(&bounds).enumerate() {
            let Some(((first, last), (first_col, last_col))) = *bound else {
                continue;
            };
            if row < first || last < row {
                continue;
            }

            let values: Vec<(usize, &str)> = (first_col..=last_col)
                .map(|col| (col, sheet.get_cell(row, col).unwrap_or("")))
                .collect();
            let match_count = values
                .iter()
                .filter(|(_, value)| is_header_cell(fields, value))
                .count();
            if match_count == 0 || match_count < num_required {
                tracing::trace!(sheet = sheet.name(), row, match_count, "Skipping row");
                continue;
            }

            match resolve(&values, fields) {
                Ok(field_col) if !field_col.is_empty() => {
                    let location = TableLocation::new(index, sheet.name(), row, last, field_col);
                    tracing::info!(
                        sheet = sheet.name(),
                        header_row = row,
                        fields = location.field_col.len(),
                        "Located table at {}",
                        location.reference()
                    );
                    return Some(location);
                }
                Ok(_) => tracing::debug!(sheet = sheet.name(), row, "Header cells resolve to no field"),
                Err(ambiguity) => tracing::debug!(sheet = sheet.name(), row, %ambiguity, "Rejected header candidate"),
            }
        }
    }

    tracing::debug!(sheets = sheets.len(), "No header row found");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::Sheet;
    use crate::table::field::HeaderPattern;
    use regex::RegexBuilder;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("id").required(true),
            FieldSpec::new("name").required(true),
            FieldSpec::new("qty"),
        ]
    }

    fn orders(name: &str, padding: usize) -> Sheet {
        let mut rows = vec![vec!["Quarterly report"]];
        for _ in 0..padding {
            rows.push(vec![]);
        }
        rows.push(vec!["", "ID", "Name", "Notes", "Qty"]);
        rows.push(vec!["", "1", "apple", "", "3"]);
        rows.push(vec!["", "2", "pear", "ripe", "5"]);
        Sheet::from_rows(name, rows)
    }

    #[test]
    fn locate_below_decoration() {
        let sheets = [orders("Orders", 1)];
        let location = locate(&sheets, &fields()).unwrap().unwrap();

        assert_eq!(location.sheet, 0);
        assert_eq!(location.sheet_name, "Orders");
        assert_eq!(location.header_row, 2);
        assert_eq!(location.min_row, 3);
        assert_eq!(location.max_row, 4);
        assert_eq!(location.min_col, 1);
        assert_eq!(location.max_col, 4);
        assert_eq!(location.column_of("id"), Some(1));
        assert_eq!(location.column_of("name"), Some(2));
        assert_eq!(location.column_of("qty"), Some(4));
        assert_eq!(location.column_of("notes"), None);
        assert_eq!(location.record_count(), 2);
        assert_eq!(location.reference(), "B3:E5");
    }

    #[test]
    fn locate_prefers_rows_near_the_top_across_sheets() {
        let sheets = [orders("Deep", 6), orders("Shallow", 2)];
        let location = locate(&sheets, &fields()).unwrap().unwrap();
        assert_eq!(location.sheet, 1);
        assert_eq!(location.sheet_name, "Shallow");
        assert_eq!(location.header_row, 3);

        let sheets = [orders("First", 2), orders("Second", 2)];
        let location = locate(&sheets, &fields()).unwrap().unwrap();
        assert_eq!(location.sheet, 0);
    }

    #[test]
    fn locate_skips_false_positive_rows() {
        let sheet = Sheet::from_rows("Data", [
            vec!["ID"],
            vec!["ID", "ID"],
            vec!["ID", "Name"],
            vec!["7", "plum"],
        ]);
        let location = locate(&[sheet], &fields()).unwrap().unwrap();

        assert_eq!(location.header_row, 2);
        assert_eq!(location.field_col, BTreeMap::from([("id".to_string(), 0), ("name".to_string(), 1)]));
    }

    #[test]
    fn locate_without_required_fields() {
        let fields = vec![FieldSpec::new("colour"), FieldSpec::new("size")];
        let sheet = Sheet::from_rows("Data", [vec!["x", "y"], vec!["Size", "z"], vec!["M", "1"]]);
        let location = locate(&[sheet], &fields).unwrap().unwrap();

        assert_eq!(location.header_row, 1);
        assert_eq!(location.field_col, BTreeMap::from([("size".to_string(), 0)]));
    }

    #[test]
    fn locate_not_found() {
        let sheets = [
            Sheet::from_rows("Data", [vec!["ID", "Title"], vec!["1", "x"]]),
            Sheet::new("Empty"),
        ];
        assert_eq!(locate(&sheets, &fields()).unwrap(), None);
        assert_eq!(locate(&[Sheet::new("Empty")], &fields()).unwrap(), None);
    }

    #[test]
    fn locate_requires_sheets() {
        let sheets: [Sheet; 0] = [];
        assert!(matches!(locate(&sheets, &fields()), Err(RustyTableError::NoSheets)));
    }

    #[test]
    fn locate_is_idempotent() {
        let sheets = [orders("A", 3), orders("B", 1)];
        let first = locate(&sheets, &fields()).unwrap();
        let second = locate(&sheets, &fields()).unwrap();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn max_row_is_the_sheet_bound() {
        let sheet = Sheet::from_rows("Data", [
            vec!["ID", "Name"],
            vec!["1", "a"],
            vec![],
            vec![],
            vec!["", "", "", "Signed off"],
        ]);
        let location = locate(&[sheet], &fields()).unwrap().unwrap();

        assert_eq!(location.max_row, 4);
        assert_eq!(location.max_col, 1);
        assert_eq!(location.record_count(), 4);
    }

    #[test]
    fn predicate_and_literal_headers() {
        let fields = vec![
            FieldSpec::new("code").header(HeaderPattern::Predicate(|value| value.starts_with('#'))),
            FieldSpec::new("label").header(HeaderPattern::literal("Description")),
        ];
        let sheet = Sheet::from_rows("Data", [vec!["", "description", "#"]]);
        let location = locate(&[&sheet], &fields).unwrap().unwrap();

        assert_eq!(location.column_of("code"), Some(2));
        assert_eq!(location.column_of("label"), Some(1));
    }

    #[test]
    fn header_regex_keeps_builder_flags() {
        let regex = RegexBuilder::new("^qty$").case_insensitive(true).build().unwrap();
        let fields = vec![FieldSpec::new("amount").required(true).header(HeaderPattern::Regex(regex))];
        let sheet = Sheet::from_rows("Data", [vec!["QTY"], vec!["3"]]);

        let values = [(0, "QTY")];
        assert_eq!(resolve(&values, &fields).unwrap(), HashMap::from([("amount".to_string(), 0)]));
        let location = locate(&[sheet], &fields).unwrap().unwrap();
        assert_eq!(location.header_row, 0);
        assert_eq!(location.column_of("amount"), Some(0));
    }
}
