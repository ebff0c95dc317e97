//! # Table Module
//!
//! Finds a logical table inside one or more cell grids and streams its rows as records.
//!
//! A [`TableDefinition`] lists the expected fields. The [`locator`] scans the sheets top-down
//! for a header row whose cells can be assigned to those fields one-to-one (see [`resolver`]);
//! the resulting [`TableLocation`] drives a [`RecordIterator`] over the rows below it.
//! [`TableReader`] ties both together and caches the location.
use thiserror::Error;

mod config;
pub mod field;
pub mod locator;
pub mod reader;
pub mod records;
pub mod resolver;

pub use field::FieldSpec;
pub use field::HeaderPattern;
pub use field::TableDefinition;
pub use field::Validator;
pub use locator::locate;
pub use locator::TableLocation;
pub use reader::TableReader;
pub use records::BlankRows;
pub use records::IterOptions;
pub use records::OnError;
pub use records::Record;
pub use records::RecordIterator;
pub use resolver::resolve;
pub use resolver::Ambiguity;

/// Errors in a table definition, raised before any sheet is searched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Table definition has no fields")]
    NoFields,

    #[error("Duplicate field '{0}'")]
    DuplicateField(String),

    #[error("Empty header pattern for field '{0}'")]
    EmptyHeader(String),

    #[error("Field '{0}' declares both a header pattern and a header literal")]
    ConflictingHeader(String),

    #[error("Field '{0}' declares both a type and a pattern to match")]
    ConflictingValidator(String),

    #[error("Unknown type '{1}' for field '{0}'")]
    UnknownType(String, String),
}

/// A value rejected by its field's validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value '{value}' for field '{field}' at {reference}")]
pub struct ExtractionError {
    /// Field whose validator failed
    pub field: String,
    /// Zero-based row of the offending cell
    pub row: usize,
    /// Zero-based column of the offending cell
    pub col: usize,
    /// A1 reference of the offending cell
    pub reference: String,
    /// Extracted value after trimming
    pub value: String,
}
