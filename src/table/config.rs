//! JSON form of a table definition.
//!
//! ```json
//! { "fields": [
//!     { "name": "id", "required": true, "type": "integer" },
//!     { "name": "full_name", "header": "(?i)^(full )?name$" },
//!     { "name": "note", "header_literal": "Remarks", "trim": false, "blank": "-" }
//! ] }
//! ```
use crate::error::RustyTableError;
use crate::table::field::FieldSpec;
use crate::table::field::HeaderPattern;
use crate::table::field::TableDefinition;
use crate::table::field::Validator;
use crate::table::DefinitionError;
use regex::Regex;
use serde::Deserialize;

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionConfig {
    fields: Vec<FieldConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldConfig {
    name: String,
    #[serde(default)]
    header: Option<String>,
    #[serde(default)]
    header_literal: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default = "default_true")]
    trim: bool,
    #[serde(default)]
    blank: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    matches: Option<String>,
}

impl TryFrom<FieldConfig> for FieldSpec {
    type Error = RustyTableError;

    fn try_from(config: FieldConfig) -> Result<Self, Self::Error> {
        let header = match (config.header, config.header_literal) {
            (Some(_), Some(_)) => Err(DefinitionError::ConflictingHeader(config.name.to_owned()))?,
            (Some(pattern), None) => HeaderPattern::regex(&pattern)?,
            (None, Some(text)) => HeaderPattern::literal(&text),
            (None, None) => HeaderPattern::from_name(&config.name),
        };
        let mut field = FieldSpec::new(&config.name)
            .header(header)
            .required(config.required)
            .trim(config.trim)
            .blank(config.blank.as_deref());
        let validator = match (config.kind, config.matches) {
            (Some(_), Some(_)) => Err(DefinitionError::ConflictingValidator(config.name.to_owned()))?,
            (Some(kind), None) => Validator::parse(&kind)
                .ok_or_else(|| DefinitionError::UnknownType(config.name.to_owned(), kind))?,
            (None, Some(pattern)) => Some(Validator::Matches(Regex::new(&pattern)?)),
            (None, None) => None,
        };
        if let Some(validator) = validator {
            field = field.validator(validator);
        }
        Ok(field)
    }
}

impl TableDefinition {
    /// Parses and validates a JSON table definition.
    pub fn from_json(json: &str) -> Result<Self, RustyTableError> {
        let config: DefinitionConfig = serde_json::from_str(json)?;
        let fields = config
            .fields
            .into_iter()
            .map(FieldSpec::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(fields)?)
    }
}
