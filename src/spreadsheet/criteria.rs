use crate::spreadsheet::range::Range;
use glob::Pattern;

/// Criteria for selecting which sheets of a workbook take part in the table search.
#[derive(Clone, Debug, Default)]
pub struct Criteria {
    /// Sheet name patterns; a sheet is selected when any pattern matches.
    pub sheet_name_patterns: Option<Vec<Pattern>>,

    /// Maximum number of sheets to read.
    pub sheet_limit: Option<usize>,

    /// Area within each sheet to search.
    pub range: Option<Range>,
}

impl Criteria {
    /// Checks if a sheet name matches the criteria patterns.
    /// Returns true if no patterns are specified or if name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        match &self.sheet_name_patterns {
            Some(patterns) => patterns.iter().any(|pattern| pattern.matches(sheet_name)),
            None => true,
        }
    }

    /// Textual form of the sheet patterns, for error messages.
    pub(crate) fn describe_patterns(&self) -> String {
        self.sheet_name_patterns
            .as_ref()
            .map(|patterns| {
                patterns
                    .iter()
                    .map(Pattern::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }
}
