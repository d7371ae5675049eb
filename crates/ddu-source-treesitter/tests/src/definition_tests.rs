use serde_json::json;

use super::*;

fn record(value: Value) -> DefinitionRecord {
    serde_json::from_value(value).expect("records always decode")
}

#[test]
fn well_formed_record_decodes_as_definition() {
    let decoded = record(json!({ "name": "foo", "kind": "function", "start": [4, 0, 10] }));
    assert_eq!(
        decoded,
        DefinitionRecord::Definition(Definition {
            name: "foo".to_string(),
            kind: "function".to_string(),
            start: StartPosition {
                row: 4,
                column: 0,
                byte: 10,
            },
        })
    );
}

#[test]
fn extra_fields_on_a_record_are_ignored() {
    let decoded = record(json!({
        "name": "foo",
        "kind": "function",
        "start": [4, 0, 10],
        "end": [6, 1, 40]
    }));
    assert!(matches!(decoded, DefinitionRecord::Definition(_)));
}

#[test]
fn incomplete_records_fall_back_to_malformed() {
    for value in [
        json!({ "name": "foo", "kind": "function" }),
        json!({ "name": "foo", "kind": "function", "start": [4, 0] }),
        json!({ "name": "foo", "kind": "function", "start": [-1, 0, 0] }),
        json!({ "name": 7, "kind": "function", "start": [4, 0, 10] }),
        json!("foo"),
        json!(null),
    ] {
        assert_eq!(record(value.clone()), DefinitionRecord::Malformed(value));
    }
}

#[test]
fn item_label_joins_name_and_kind_and_line_is_one_based() {
    let item = record(json!({ "name": "bar", "kind": "variable", "start": [9, 2, 50] }))
        .into_item(7)
        .expect("definition maps to an item");

    assert_eq!(item.word, "bar variable");
    assert_eq!(
        item.action,
        ActionData {
            buf_nr: 7,
            line_nr: 10,
        }
    );
}

#[test]
fn first_row_maps_to_line_one() {
    let item = record(json!({ "name": "main", "kind": "function", "start": [0, 0, 0] }))
        .into_item(1)
        .expect("definition maps to an item");
    assert_eq!(item.action.line_nr, 1);
}

#[test]
fn malformed_record_refuses_to_become_an_item() {
    let value = json!({ "kind": "function" });
    let error = DefinitionRecord::Malformed(value.clone()).into_item(1).unwrap_err();
    assert_eq!(error, DefinitionError::Malformed(value));
    assert!(error.to_string().starts_with("malformed definition record"));
}

#[test]
fn last_representable_row_overflows() {
    let definition = Definition {
        name: "huge".to_string(),
        kind: "function".to_string(),
        start: StartPosition {
            row: u64::MAX,
            column: 0,
            byte: 0,
        },
    };

    assert_eq!(
        definition.to_item(1),
        Err(DefinitionError::LineOverflow {
            name: "huge".to_string(),
            row: u64::MAX,
        })
    );
}
