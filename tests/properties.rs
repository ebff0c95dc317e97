use proptest::prelude::*;
use rusty_table::spreadsheet::Sheet;
use rusty_table::table::resolve;
use rusty_table::table::FieldSpec;
use rusty_table::table::HeaderPattern;
use rusty_table::table::TableDefinition;
use rusty_table::table::TableReader;
use std::collections::HashSet;

const HEADERS: [&str; 7] = ["ID", "Name", "Full Name", "Qty", "Price", "Other", ""];
const NAMES: [&str; 5] = ["id", "name", "full_name", "qty", "price"];

fn header_row() -> impl Strategy<Value = Vec<(usize, String)>> {
    prop::collection::vec(prop::sample::select(HEADERS.to_vec()), 0..8)
        .prop_map(|cells| cells.into_iter().map(str::to_owned).enumerate().collect())
}

fn fields() -> impl Strategy<Value = Vec<FieldSpec>> {
    (prop::sample::subsequence(NAMES.to_vec(), 1..=NAMES.len()), any::<[bool; 5]>()).prop_map(
        |(names, required)| {
            names
                .into_iter()
                .zip(required)
                .map(|(name, required)| {
                    let field = FieldSpec::new(name).required(required);
                    // "name" also matches "Full Name"
                    if name == "name" {
                        field.header(HeaderPattern::regex("(?i)name").unwrap())
                    } else {
                        field
                    }
                })
                .collect()
        },
    )
}

fn data_rows() -> impl Strategy<Value = (Vec<Vec<String>>, Vec<Vec<String>>)> {
    prop::collection::vec(prop::collection::vec(0u32..1000, 3), 1..20)
        .prop_map(|rows| {
            rows.into_iter()
                .map(|row| row.into_iter().map(|value| value.to_string()).collect())
                .collect::<Vec<Vec<String>>>()
        })
        .prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle()))
}

fn sheet(padding: usize, data: Vec<Vec<String>>) -> Sheet {
    let mut rows: Vec<Vec<String>> = vec![vec![]; padding];
    rows.push(vec!["Qty".to_string(), "ID".to_string(), "Name".to_string()]);
    rows.extend(data);
    Sheet::from_rows("Data", rows)
}

proptest! {
    #[test]
    fn resolved_columns_are_unique(row in header_row(), fields in fields()) {
        if let Ok(field_col) = resolve(&row, &fields) {
            let columns: HashSet<usize> = field_col.values().copied().collect();
            prop_assert_eq!(columns.len(), field_col.len());
            for (name, col) in &field_col {
                prop_assert!(fields.iter().any(|field| &field.name == name && field.header.test(&row[*col].1)));
            }
        }
    }

    #[test]
    fn required_fields_are_always_resolved(row in header_row(), fields in fields()) {
        if let Ok(field_col) = resolve(&row, &fields) {
            for field in fields.iter().filter(|field| field.required) {
                prop_assert!(field_col.contains_key(&field.name));
            }
        }
    }

    #[test]
    fn location_ignores_data_order(padding in 0usize..5, (data, shuffled) in data_rows()) {
        let fields = vec![FieldSpec::new("id").required(true), FieldSpec::new("name"), FieldSpec::new("qty")];
        let first_sheets = [sheet(padding, data.clone())];
        let second_sheets = [sheet(padding, shuffled.clone())];
        let first = TableReader::new(&first_sheets, TableDefinition::new(fields.clone()).unwrap()).unwrap();
        let second = TableReader::new(&second_sheets, TableDefinition::new(fields).unwrap()).unwrap();

        prop_assert!(first.location().is_some());
        prop_assert_eq!(first.location().map(|location| location.header_row), Some(padding));
        prop_assert_eq!(first.location(), second.location());

        // Sheet columns are Qty, ID, Name; records follow field order id, name, qty
        let expected = |rows: &[Vec<String>]| -> Vec<Vec<Option<String>>> {
            rows.iter()
                .map(|row| vec![Some(row[1].clone()), Some(row[2].clone()), Some(row[0].clone())])
                .collect()
        };
        prop_assert_eq!(first.all_as_sequences().unwrap(), expected(&data));
        prop_assert_eq!(second.all_as_sequences().unwrap(), expected(&shuffled));
    }
}
