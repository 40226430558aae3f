//! Property tests for the pipe-table codec.

use proptest::prelude::*;
use quill_babel::{parse_table, serialize_table, TableValue};

fn uniform_table() -> impl Strategy<Value = TableValue> {
    (1usize..5)
        .prop_flat_map(|width| {
            (
                prop::collection::vec("[a-zA-Z0-9]{1,6}", width),
                prop::collection::vec(prop::collection::vec("[a-z0-9 ]{0,6}", width), 1..5),
            )
        })
        .prop_map(|(headers, rows)| {
            let rows = rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| cell.trim().to_string()).collect())
                .collect();
            TableValue::new(headers, rows)
        })
}

proptest! {
    #[test]
    fn test_table_round_trip(table in uniform_table()) {
        let text = serialize_table(&table);
        prop_assert_eq!(parse_table(&text), Some(table));
    }

    #[test]
    fn test_parse_never_panics(text in "[|a-z \n:-]{0,40}") {
        if let Some(table) = parse_table(&text) {
            prop_assert!(!table.headers.is_empty());
            for row in &table.rows {
                prop_assert_eq!(row.len(), table.headers.len());
            }
        }
    }
}
