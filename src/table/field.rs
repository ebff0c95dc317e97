use crate::table::DefinitionError;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use regex::Regex;
use std::collections::HashSet;

/// Decides whether a header cell could label a field.
#[derive(Clone, Debug)]
pub enum HeaderPattern {
    /// Case-insensitive equality with the trimmed cell text
    Literal(String),
    /// Regular expression searched in the raw cell text
    Regex(Regex),
    /// Arbitrary test on the raw cell text
    Predicate(fn(&str) -> bool),
}

impl HeaderPattern {
    pub fn literal(text: &str) -> Self {
        Self::Literal(text.trim().to_owned())
    }

    /// Compiles a regular expression pattern.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Regex(Regex::new(pattern)?))
    }

    /// Default pattern for a field name: its words in order, case-insensitive, separated and
    /// surrounded by any run of non-word characters. `full_name` matches `"Full Name"` and `"FULL-NAME:"`.
    pub fn from_name(name: &str) -> Self {
        let words: Vec<String> = name
            .split(|c: char| c == '_' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .map(regex::escape)
            .collect();
        let pattern = format!(r"(?i)^[\W_]*{}[\W_]*$", words.join(r"[\W_]*"));
        Self::regex(&pattern).unwrap_or_else(|_| Self::literal(name))
    }

    /// Tests a cell value against the pattern.
    pub fn test(&self, value: &str) -> bool {
        match self {
            Self::Literal(text) => value.trim().to_lowercase() == text.to_lowercase(),
            Self::Regex(regex) => regex.is_match(value),
            Self::Predicate(predicate) => predicate(value),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Literal(text) => text.is_empty(),
            Self::Regex(regex) => regex.as_str().is_empty(),
            Self::Predicate(_) => false,
        }
    }
}

/// Type check applied to extracted, non-blank values.
///
/// Empty cells are never validated, neither is the field's `blank` substitute that replaces them.
#[derive(Clone, Debug)]
pub enum Validator {
    /// Signed 64-bit integer
    Integer,
    /// Finite floating point number
    Number,
    /// `true/false`, `yes/no`, `1/0` in any case
    Boolean,
    /// ISO date, optionally followed by a time
    Date,
    /// Regular expression searched in the value
    Matches(Regex),
    /// Arbitrary test on the value
    Predicate(fn(&str) -> bool),
}

impl Validator {
    /// Parses a type name. Text types need no validation and yield `None`.
    pub fn parse(name: &str) -> Option<Option<Self>> {
        match name.to_ascii_uppercase().as_str() {
            "BOOL" | "BOOLEAN" => Some(Some(Self::Boolean)),
            "INT" | "BIGINT" | "INTEGER" => Some(Some(Self::Integer)),
            "FLOAT" | "DOUBLE" | "DECIMAL" | "NUMERIC" => Some(Some(Self::Number)),
            "DATE" => Some(Some(Self::Date)),
            "TEXT" | "STRING" | "VARCHAR" => Some(None),
            _ => None,
        }
    }

    /// Tests an extracted value.
    pub fn test(&self, value: &str) -> bool {
        match self {
            Self::Integer => value.parse::<i64>().is_ok(),
            Self::Number => value.parse::<f64>().map(f64::is_finite).unwrap_or(false),
            Self::Boolean => matches!(
                value.to_ascii_lowercase().as_str(),
                "true" | "false" | "yes" | "no" | "1" | "0"
            ),
            Self::Date => {
                NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
                    || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
                    || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
            }
            Self::Matches(regex) => regex.is_match(value),
            Self::Predicate(predicate) => predicate(value),
        }
    }
}

/// Describes one logical column of the table.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    /// Unique name within the table definition
    pub name: String,
    /// Test deciding whether a header cell labels this field
    pub header: HeaderPattern,
    /// The table search fails unless this field gets a column
    pub required: bool,
    /// Strip leading and trailing whitespace from values
    pub trim: bool,
    /// Substitute for empty cells
    pub blank: Option<String>,
    /// Optional type check for non-blank values; `blank` substitutes skip it
    pub validator: Option<Validator>,
}

impl FieldSpec {
    /// Creates an optional, trimming field whose header is derived from its name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            header: HeaderPattern::from_name(name),
            required: false,
            trim: true,
            blank: None,
            validator: None,
        }
    }

    pub fn header(mut self, header: HeaderPattern) -> Self {
        self.header = header;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn blank(mut self, blank: Option<&str>) -> Self {
        self.blank = blank.map(str::to_owned);
        self
    }

    /// Checks non-blank values. Empty cells and their `blank` substitute are not checked.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// An ordered, validated set of fields.
#[derive(Clone, Debug)]
pub struct TableDefinition {
    fields: Vec<FieldSpec>,
}

impl TableDefinition {
    /// Checks that there is at least one field, names are unique and header patterns non-empty.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, DefinitionError> {
        if fields.is_empty() {
            Err(DefinitionError::NoFields)?
        }
        let mut names = HashSet::new();
        for field in &fields {
            if !names.insert(field.name.as_str()) {
                Err(DefinitionError::DuplicateField(field.name.to_owned()))?
            }
            if field.header.is_empty() {
                Err(DefinitionError::EmptyHeader(field.name.to_owned()))?
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}
