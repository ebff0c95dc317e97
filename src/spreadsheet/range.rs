use crate::error::RustyTableError;
use crate::spreadsheet::reference::col_to_index;
use crate::spreadsheet::reference::row_to_index;
use regex::Regex;
use thiserror::Error;

/// Errors related to Excel-style range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid range format '{0}'")]
    FormatError(String),
}

/// An Excel-style cell range with optional boundaries, all zero-based and inclusive.
/// Restricts the area of a sheet that the table search may look at.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Range {
    /// Lower row bound, None for unbounded
    pub row_lower_bound: Option<usize>,
    /// Upper row bound, None for unbounded
    pub row_upper_bound: Option<usize>,
    /// Lower column bound, None for unbounded
    pub col_lower_bound: Option<usize>,
    /// Upper column bound, None for unbounded
    pub col_upper_bound: Option<usize>,
}

impl Range {
    /// Intersects inclusive sheet bounds with the row bounds of this range.
    pub fn clip_rows(&self, (lower, upper): (usize, usize)) -> Option<(usize, usize)> {
        clip(lower, upper, self.row_lower_bound, self.row_upper_bound)
    }

    /// Intersects inclusive sheet bounds with the column bounds of this range.
    pub fn clip_cols(&self, (lower, upper): (usize, usize)) -> Option<(usize, usize)> {
        clip(lower, upper, self.col_lower_bound, self.col_upper_bound)
    }

    /// Checks if a cell lies inside the range.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.row_lower_bound.map_or(true, |bound| bound <= row)
            && self.row_upper_bound.map_or(true, |bound| row <= bound)
            && self.col_lower_bound.map_or(true, |bound| bound <= col)
            && self.col_upper_bound.map_or(true, |bound| col <= bound)
    }
}

fn clip(lower: usize, upper: usize, min: Option<usize>, max: Option<usize>) -> Option<(usize, usize)> {
    let lower = min.map_or(lower, |min| min.max(lower));
    let upper = max.map_or(upper, |max| max.min(upper));
    Some((lower, upper)).filter(|(lower, upper)| lower <= upper)
}

impl TryFrom<&str> for Range {
    type Error = RustyTableError;

    /// Parses an Excel-style range string (e.g., "A1", "B2:C5", "A:C", "3:10").
    /// Missing parts leave that side unbounded.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let pattern = Regex::new(r"^([A-Z]*)(\d*)(:([A-Z]*)(\d*))?$").expect("Hardcode regex pattern");
        let value = value.trim().replace('$', "").to_ascii_uppercase();
        let captures = pattern
            .captures(value.as_str())
            .filter(|_| !value.is_empty())
            .ok_or(RangeError::FormatError(value.to_owned()))?;
        // A present but unusable part (row 0, columns past usize) is an error, not an open bound
        let bound = |group: usize, parse: fn(&str) -> Option<usize>| {
            match captures.get(group).map(|matcher| matcher.as_str()).filter(|part| !part.is_empty()) {
                Some(part) => parse(part).map(Some).ok_or_else(|| RangeError::FormatError(value.to_owned())),
                None => Ok(None),
            }
        };
        let range = Range {
            col_lower_bound: bound(1, col_to_index)?,
            row_lower_bound: bound(2, row_to_index)?,
            col_upper_bound: bound(4, col_to_index)?,
            row_upper_bound: bound(5, row_to_index)?,
        };
        if range.row_lower_bound.zip(range.row_upper_bound).is_some_and(|(lower, upper)| lower > upper)
            || range.col_lower_bound.zip(range.col_upper_bound).is_some_and(|(lower, upper)| lower > upper)
        {
            Err(RangeError::FormatError(value))?
        }
        Ok(range)
    }
}
