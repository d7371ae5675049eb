use serde_json::json;

use super::*;

#[test]
fn item_serializes_with_file_kind_field_names() {
    let item = Item {
        word: "foo function".to_string(),
        action: ActionData {
            buf_nr: 3,
            line_nr: 5,
        },
    };

    assert_eq!(
        serde_json::to_value(&item).expect("item serializes"),
        json!({ "word": "foo function", "action": { "bufNr": 3, "lineNr": 5 } })
    );
}

#[test]
fn params_serialize_as_empty_object() {
    assert_eq!(serde_json::to_value(Params::default()).expect("params serialize"), json!({}));
}

#[test]
fn context_keeps_buffer_and_tolerates_unknown_keys() {
    let context: Context = serde_json::from_value(json!({
        "bufNr": 12,
        "winId": 1000,
        "input": "fo",
        "path": "/tmp/main.rs"
    }))
    .expect("context deserializes");

    assert_eq!(context.buf_nr, 12);
    assert_eq!(context._extra.len(), 3);
}

#[test]
fn context_without_buffer_is_rejected() {
    let result = serde_json::from_value::<Context>(json!({ "winId": 1000 }));
    assert!(result.is_err());
}

#[test]
fn json_lines_put_one_item_per_line() {
    let items = vec![
        Item {
            word: "a function".to_string(),
            action: ActionData {
                buf_nr: 1,
                line_nr: 1,
            },
        },
        Item {
            word: "b variable".to_string(),
            action: ActionData {
                buf_nr: 1,
                line_nr: 2,
            },
        },
    ];

    let rendered = to_json_lines(&items).expect("items render");
    assert_eq!(rendered.lines().count(), 2);
    assert!(rendered.ends_with('\n'));
    assert_eq!(to_json_lines(&[]).expect("empty renders"), "");
}
