use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::range::Range;
use crate::spreadsheet::CellGrid;
use std::collections::HashMap;

/// An in-memory, sparsely populated sheet: decoded cells plus a position index.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// All cells in the sheet, in insertion order
    cells: Vec<Cell>,
    /// Position of each cell in `cells`
    indexes: HashMap<(usize, usize), usize>,
    /// Area visible to readers of this sheet
    range: Range,
    /// Actual data bounds (determined from cell data)
    row_lower_bound: Option<usize>,
    row_upper_bound: Option<usize>,
    col_lower_bound: Option<usize>,
    col_upper_bound: Option<usize>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Builds a sheet from rows of text, starting at A1. Empty strings leave the cell absent.
    pub fn from_rows<R, S>(name: &str, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sheet = Self::new(name);
        for (row, values) in rows.into_iter().enumerate() {
            for (col, value) in values.into_iter().enumerate() {
                let value = value.as_ref();
                if !value.is_empty() {
                    sheet.push(Cell {
                        row,
                        col,
                        kind: CellType::InlineString,
                        value: value.to_owned(),
                    });
                }
            }
        }
        sheet
    }

    /// Restricts the visible area of this sheet.
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Returns true if the sheet contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Adds a cell, replacing any earlier cell at the same position, and widens the data bounds.
    pub fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        match self.indexes.get(&(cell.row, cell.col)) {
            Some(index) => self.cells[*index] = cell,
            None => {
                self.indexes.insert((cell.row, cell.col), self.cells.len());
                self.cells.push(cell);
            }
        }
    }

    /// Gets the cell at a position, if present and visible.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if !self.range.contains(row, col) {
            return None;
        }
        self.indexes.get(&(row, col)).map(|index| &self.cells[*index])
    }

    fn update_bound(&mut self, row: usize, col: usize) {
        if self.row_lower_bound.map(|bound| row < bound).unwrap_or(true) {
            self.row_lower_bound = Some(row);
        }
        if self.row_upper_bound.map(|bound| bound < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
        if self.col_lower_bound.map(|bound| col < bound).unwrap_or(true) {
            self.col_lower_bound = Some(col);
        }
        if self.col_upper_bound.map(|bound| bound < col).unwrap_or(true) {
            self.col_upper_bound = Some(col);
        }
    }
}

impl CellGrid for Sheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_range(&self) -> Option<(usize, usize)> {
        self.range.clip_rows(self.row_lower_bound.zip(self.row_upper_bound)?)
    }

    fn col_range(&self) -> Option<(usize, usize)> {
        self.range.clip_cols(self.col_lower_bound.zip(self.col_upper_bound)?)
    }

    fn get_cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cell(row, col).map(|cell| cell.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(sheet: &mut Sheet, row: usize, col: usize, value: &str) {
        sheet.push(Cell {
            row,
            col,
            kind: CellType::InlineString,
            value: value.to_owned(),
        });
    }

    #[test]
    fn sheet_initial() {
        let sheet = Sheet::new("empty");

        assert!(sheet.is_empty());
        assert_eq!(sheet.row_range(), None);
        assert_eq!(sheet.col_range(), None);
        assert_eq!(sheet.get_cell(0, 0), None);
    }

    #[test]
    fn sheet_update() {
        let mut sheet = Sheet::new("data");
        push(&mut sheet, 3, 3, "d");
        push(&mut sheet, 1, 1, "a");
        push(&mut sheet, 1, 3, "b");
        push(&mut sheet, 3, 1, "c");

        assert_eq!(sheet.len(), 4);
        assert_eq!(sheet.row_range(), Some((1, 3)));
        assert_eq!(sheet.col_range(), Some((1, 3)));
        assert_eq!(sheet.get_cell(1, 3), Some("b"));
        assert_eq!(sheet.get_cell(2, 2), None);
    }

    #[test]
    fn sheet_push_replaces() {
        let mut sheet = Sheet::new("data");
        push(&mut sheet, 0, 0, "old");
        push(&mut sheet, 0, 0, "new");

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get_cell(0, 0), Some("new"));
    }

    #[test]
    fn sheet_from_rows() {
        let sheet = Sheet::from_rows("rows", [vec!["", "x"], vec![], vec!["y", ""]]);

        assert_eq!(sheet.name(), "rows");
        assert_eq!(sheet.row_range(), Some((0, 2)));
        assert_eq!(sheet.col_range(), Some((0, 1)));
        assert_eq!(sheet.get_cell(0, 1), Some("x"));
        assert_eq!(sheet.get_cell(2, 0), Some("y"));
        assert_eq!(sheet.get_cell(0, 0), None);
    }

    #[test]
    fn sheet_with_range() {
        let sheet = Sheet::from_rows("rows", [
            vec!["a", "b", "c"],
            vec!["d", "e", "f"],
            vec!["g", "h", "i"],
        ])
        .with_range(Range::try_from("B2:C").unwrap());

        assert_eq!(sheet.row_range(), Some((1, 2)));
        assert_eq!(sheet.col_range(), Some((1, 2)));
        assert_eq!(sheet.get_cell(1, 1), Some("e"));
        assert_eq!(sheet.get_cell(0, 1), None);
        assert_eq!(sheet.get_cell(1, 0), None);
    }
}
