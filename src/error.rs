use thiserror::Error;

/// Main error type for the Rusty Table crate.
/// Aggregates errors from the workbook decoder, the table definition and record extraction.
#[derive(Error, Debug)]
pub enum RustyTableError {
    #[error("{0}")]
    WithContextError(String),

    /// No sheet was handed to the table search.
    #[error("No sheets available to search for a table")]
    NoSheets,

    /// Records were requested but no header row matched the table definition.
    #[error("No row matches the table header")]
    TableNotFound,

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    // Third-party library errors
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    RegexError(#[from] regex::Error),

    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    RangeError(#[from] crate::spreadsheet::range::RangeError),

    // Table module errors
    #[error("{0}")]
    DefinitionError(#[from] crate::table::DefinitionError),

    #[error("{0}")]
    ExtractionError(#[from] crate::table::ExtractionError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RustyTableError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RustyTableError::WithContextError(format!("{}: {}", message, e)))
    }
}
