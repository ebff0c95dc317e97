//! # Rusty Table
//!
//! Locates a data table embedded anywhere in one or more spreadsheet sheets and reads it as
//! clean records, without knowing ahead of time where the table starts, in which order its
//! columns appear, or what decoration surrounds it.
//!
//! ## Features
//!
//! - **Header discovery**: rows are scanned top-down, interleaved across sheets, for the first row
//!   whose cells can be assigned one-to-one to the declared fields
//! - **Ambiguity resolution**: a header cell matching several fields is settled by deferring it
//!   until other fields have claimed their columns
//! - **Record streaming**: per-field trimming, blank substitutes, blank-row policies
//!   (end, skip, keep) and opt-in type validation with strict or tolerant error handling
//! - **Excel workbooks**: `.xlsx`, `.xlsm` and `.xlam` files are decoded into in-memory sheets,
//!   with sheet selection by glob pattern and an optional A1 range
//!
//! ## Example
//!
//! ```
//! use rusty_table::spreadsheet::Sheet;
//! use rusty_table::table::{FieldSpec, TableDefinition, TableReader};
//!
//! let sheet = Sheet::from_rows("Orders", [
//!     vec!["Monthly orders", "", ""],
//!     vec!["", "", ""],
//!     vec!["Qty", "Order ID", "Customer"],
//!     vec!["3", "1001", "Ada"],
//! ]);
//! let definition = TableDefinition::new(vec![
//!     FieldSpec::new("order_id").required(true),
//!     FieldSpec::new("qty"),
//! ])?;
//! let sheets = [sheet];
//! let reader = TableReader::new(&sheets, definition)?;
//!
//! assert_eq!(reader.location().map(|location| location.header_row), Some(2));
//! assert_eq!(
//!     reader.all_as_sequences()?,
//!     vec![vec![Some("1001".to_string()), Some("3".to_string())]]
//! );
//! # Ok::<(), rusty_table::error::RustyTableError>(())
//! ```
pub mod error;
mod helpers;
pub mod spreadsheet;
pub mod table;

pub use error::RustyTableError;
pub use spreadsheet::read_workbook;
pub use spreadsheet::CellGrid;
pub use spreadsheet::Criteria;
pub use spreadsheet::Sheet;
pub use table::locate;
pub use table::FieldSpec;
pub use table::TableDefinition;
pub use table::TableLocation;
pub use table::TableReader;
