//! # Spreadsheet Module
//!
//! The cell-grid side of the crate: the [`CellGrid`] capability the table search runs on,
//! an in-memory [`Sheet`] implementation, and a decoder that loads Excel 2007+ workbooks
//! (`.xlsx`, `.xlsm`, `.xlam`) into sheets.
use crate::error::ResultMessage;
use crate::error::RustyTableError;
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;

pub mod cell;
pub mod criteria;
mod excel;
pub mod range;
pub mod reference;
pub mod sheet;
pub mod xlsx;

pub use cell::Cell;
pub use cell::CellType;
pub use criteria::Criteria;
pub use range::Range;
pub use sheet::Sheet;
pub use xlsx::XlsxSpreadsheet;

/// Errors raised while opening a workbook or selecting its sheets.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Cannot detect file format for '{0}'")]
    InvalidFileFormat(String),

    #[error("Missing part '{0}' in workbook package")]
    FileError(String),

    #[error("Workbook '{0}' contains no worksheets")]
    SpreadsheetEmptyError(String),

    #[error("No sheet in '{0}' matches '{1}'")]
    SheetSelectorError(String, String),
}

/// Read-only view of one sheet: bounded ranges plus cell text lookup.
///
/// Bounds are inclusive and zero-based; `None` means the sheet holds no data.
/// An absent cell is treated exactly like an empty string by the table search.
pub trait CellGrid {
    /// Sheet name, used for sheet selection and messages.
    fn name(&self) -> &str;

    /// First and last row holding data.
    fn row_range(&self) -> Option<(usize, usize)>;

    /// First and last column holding data.
    fn col_range(&self) -> Option<(usize, usize)>;

    /// Text of the cell at (row, col), `None` when absent.
    fn get_cell(&self, row: usize, col: usize) -> Option<&str>;
}

impl<G: CellGrid + ?Sized> CellGrid for &G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn row_range(&self) -> Option<(usize, usize)> {
        (**self).row_range()
    }

    fn col_range(&self) -> Option<(usize, usize)> {
        (**self).col_range()
    }

    fn get_cell(&self, row: usize, col: usize) -> Option<&str> {
        (**self).get_cell(row, col)
    }
}

/// Opens a workbook by file extension and decodes the sheets accepted by the criteria.
///
/// # Errors
///
/// Fails when the format is not supported, the package cannot be decoded,
/// or no sheet matches the criteria.
pub fn read_workbook(file_name: &str, criteria: &Criteria) -> Result<Vec<Sheet>, RustyTableError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    let sheets = match extension.as_deref() {
        Some("xlsx") | Some("xlsm") | Some("xlam") => {
            XlsxSpreadsheet::open(file_name).and_then(|mut spreadsheet| spreadsheet.read_sheets(criteria))
        }
        _ => Err(SpreadsheetError::InvalidFileFormat(file_name.to_owned()).into()),
    }
    .with_prefix(file_name)?;
    if sheets.is_empty() {
        Err(SpreadsheetError::SheetSelectorError(
            file_name.to_owned(),
            criteria.describe_patterns(),
        ))?
    }
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_workbook_rejects_unknown_format() {
        let error = read_workbook("report.csv", &Criteria::default()).unwrap_err();
        assert_eq!(error.to_string(), "report.csv: Cannot detect file format for 'report.csv'");
    }

    #[test]
    fn read_workbook_missing_file() {
        let error = read_workbook("does-not-exist.xlsx", &Criteria::default()).unwrap_err();
        assert!(error.to_string().starts_with("does-not-exist.xlsx: "));
    }
}
