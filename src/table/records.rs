//! Streaming extraction of the rows below a located header.
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::CellGrid;
use crate::table::field::FieldSpec;
use crate::table::locator::TableLocation;
use crate::table::ExtractionError;
use serde::Serialize;
use std::collections::BTreeMap;

/// An extracted value; `None` when the cell was blank and the field has no substitute.
pub type Value = Option<String>;

/// What to do with a row where every field fell back to its blank substitute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlankRows {
    /// Stop at the first blank row
    #[default]
    End,
    /// Drop blank rows and keep reading
    Skip,
    /// Emit blank rows as records
    Keep,
}

/// What to do with a value rejected by its field's validator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OnError {
    /// Yield the error and stop
    #[default]
    Fail,
    /// Replace the value and keep reading
    Substitute(Value),
    /// Drop the row and keep reading
    SkipRow,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IterOptions {
    /// Emit records keyed by field name instead of positional sequences
    pub as_mapping: bool,
    pub blank_rows: BlankRows,
    pub on_error: OnError,
}

/// One row of the table, restricted to resolved fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// Values in field declaration order
    Sequence(Vec<Value>),
    /// Values keyed by field name
    Mapping(BTreeMap<String, Value>),
}

impl Record {
    pub fn into_sequence(self) -> Option<Vec<Value>> {
        match self {
            Self::Sequence(values) => Some(values),
            Self::Mapping(_) => None,
        }
    }

    pub fn into_mapping(self) -> Option<BTreeMap<String, Value>> {
        match self {
            Self::Mapping(values) => Some(values),
            Self::Sequence(_) => None,
        }
    }
}

/// Forward-only iterator over the data rows of a located table.
///
/// Starts on the header row and advances one row per step until the location's last row,
/// the first blank row under [`BlankRows::End`], or the first rejected value under [`OnError::Fail`].
/// Each iterator keeps its own cursor; [`RecordIterator::rewind`] starts over.
pub struct RecordIterator<'a, G: CellGrid> {
    grid: &'a G,
    location: &'a TableLocation,
    /// Resolved fields with their columns, in declaration order
    columns: Vec<(&'a FieldSpec, usize)>,
    options: IterOptions,
    row: usize,
    col: Option<usize>,
    ended: bool,
}

impl<'a, G: CellGrid> RecordIterator<'a, G> {
    pub fn new(grid: &'a G, location: &'a TableLocation, fields: &'a [FieldSpec], options: IterOptions) -> Self {
        let columns = fields
            .iter()
            .filter_map(|field| location.column_of(&field.name).map(|col| (field, col)))
            .collect();
        Self {
            grid,
            location,
            columns,
            options,
            row: location.header_row,
            col: None,
            ended: false,
        }
    }

    /// Row of the last record read, the header row before the first one.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column of the last cell read.
    pub fn col(&self) -> Option<usize> {
        self.col
    }

    /// Rows left before the location's last row; zero once the iterator has ended.
    pub fn remaining(&self) -> usize {
        if self.ended {
            0
        } else {
            self.location.max_row.saturating_sub(self.row)
        }
    }

    /// Moves back before the first data row.
    pub fn rewind(&mut self) {
        self.row = self.location.header_row;
        self.col = None;
        self.ended = false;
    }

    /// Extracts the current row. `Ok(None)` means the row produced no record.
    fn extract(&mut self) -> Result<Option<Record>, ExtractionError> {
        let mut values = Vec::with_capacity(self.columns.len());
        let mut blank = true;
        for &(field, col) in &self.columns {
            self.col = Some(col);
            let cell = self.grid.get_cell(self.row, col).unwrap_or("");
            let text = if field.trim { cell.trim() } else { cell };
            if text.is_empty() {
                values.push(field.blank.to_owned());
                continue;
            }
            blank = false;

            if let Some(validator) = &field.validator {
                if !validator.test(text) {
                    let error = ExtractionError {
                        field: field.name.to_owned(),
                        row: self.row,
                        col,
                        reference: index_to_reference(self.row, col),
                        value: text.to_owned(),
                    };
                    match &self.options.on_error {
                        OnError::Fail => Err(error)?,
                        OnError::Substitute(value) => {
                            tracing::warn!("{error}, substituted");
                            values.push(value.to_owned());
                            continue;
                        }
                        OnError::SkipRow => {
                            tracing::warn!("{error}, row skipped");
                            return Ok(None);
                        }
                    }
                }
            }
            values.push(Some(text.to_owned()));
        }

        if blank {
            match self.options.blank_rows {
                BlankRows::End => {
                    tracing::debug!(row = self.row, "Blank row ends the table");
                    self.ended = true;
                    return Ok(None);
                }
                BlankRows::Skip => return Ok(None),
                BlankRows::Keep => {}
            }
        }

        let record = if self.options.as_mapping {
            Record::Mapping(
                self.columns
                    .iter()
                    .map(|(field, _)| field.name.to_owned())
                    .zip(values)
                    .collect(),
            )
        } else {
            Record::Sequence(values)
        };
        Ok(Some(record))
    }
}

impl<G: CellGrid> Iterator for RecordIterator<'_, G> {
    type Item = Result<Record, ExtractionError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.ended {
            if self.row >= self.location.max_row {
                self.ended = true;
                break;
            }
            self.row += 1;
            match self.extract() {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(error) => {
                    self.ended = true;
                    return Some(Err(error));
                }
            }
        }
        None
    }
}
