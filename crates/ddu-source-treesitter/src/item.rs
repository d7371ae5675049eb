//! Data shapes exchanged with the picker framework.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request context the picker hands to a source on every gather.
///
/// Only the active buffer is consumed here; the picker sends many more keys
/// (input, window id, path, ...) which are kept but never interpreted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub buf_nr: u64,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}

impl Context {
    pub fn new(buf_nr: u64) -> Self {
        Self {
            buf_nr,
            _extra: HashMap::new(),
        }
    }
}

/// One selectable entry in the picker list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Text shown to the user and matched against by the fuzzy filter.
    pub word: String,
    pub action: ActionData,
}

/// Jump target understood by the `file` kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    pub buf_nr: u64,
    /// One-based line number.
    pub line_nr: u64,
}

/// Source parameters. This source recognizes none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {}

/// Render items as newline-delimited JSON, one item per line.
pub fn to_json_lines(items: &[Item]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for item in items {
        out.push_str(&serde_json::to_string(item)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/src/item_tests.rs"]
mod tests;
