//! Assigns fields to the columns of a candidate header row.
use crate::table::field::FieldSpec;
use std::collections::HashMap;
use std::collections::VecDeque;
use thiserror::Error;

/// Why a candidate header row could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Ambiguity {
    #[error("Required field '{0}' only matches columns claimed by other fields")]
    Unclaimable(String),

    #[error("Fields {0:?} keep competing for the same columns")]
    Irreducible(Vec<String>),

    #[error("Required field '{0}' matches no header cell")]
    MissingRequired(String),
}

/// Assigns each field to at most one column of a header row, each column to at most one field.
///
/// `row_values` pairs a column index with the cell text; empty cells never match.
/// Fields with a single free candidate claim it immediately. Fields with several are deferred
/// to the back of the work-list until claims by other fields narrow their choice; the search
/// gives up once every pending field has been deferred without progress.
///
/// # Errors
///
/// Returns the [`Ambiguity`] that stopped the resolution. Optional fields never cause one:
/// they are left out of the mapping instead.
pub fn resolve<S: AsRef<str>>(
    row_values: &[(usize, S)],
    fields: &[FieldSpec],
) -> Result<HashMap<String, usize>, Ambiguity> {
    let candidates: Vec<Vec<usize>> = fields
        .iter()
        .map(|field| {
            row_values
                .iter()
                .filter(|(_, value)| {
                    let value = value.as_ref();
                    !value.is_empty() && field.header.test(value)
                })
                .map(|(col, _)| *col)
                .collect()
        })
        .collect();

    // column -> index of the field that claimed it
    let mut claimed: HashMap<usize, usize> = HashMap::new();
    let mut pending: VecDeque<usize> = (0..fields.len()).collect();
    let mut deferred = 0;
    while let Some(index) = pending.pop_front() {
        if candidates[index].is_empty() {
            continue;
        }
        let field = &fields[index];
        let available: Vec<usize> = candidates[index]
            .iter()
            .copied()
            .filter(|col| !claimed.contains_key(col))
            .collect();
        match available.as_slice() {
            [] if field.required => Err(Ambiguity::Unclaimable(field.name.to_owned()))?,
            [] => {}
            [col] => {
                claimed.insert(*col, index);
                deferred = 0;
            }
            _ => {
                pending.push_back(index);
                deferred += 1;
                if deferred > pending.len() {
                    let mut indexes: Vec<usize> = pending.iter().copied().collect();
                    indexes.sort_unstable();
                    Err(Ambiguity::Irreducible(
                        indexes.into_iter().map(|index| fields[index].name.to_owned()).collect(),
                    ))?
                }
            }
        }
    }

    let field_col: HashMap<String, usize> = claimed
        .into_iter()
        .map(|(col, index)| (fields[index].name.to_owned(), col))
        .collect();
    if let Some(field) = fields
        .iter()
        .find(|field| field.required && !field_col.contains_key(&field.name))
    {
        Err(Ambiguity::MissingRequired(field.name.to_owned()))?
    }
    Ok(field_col)
}
