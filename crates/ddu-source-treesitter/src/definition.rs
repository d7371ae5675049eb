use std::fmt::{Display, Formatter};

use serde::Deserialize;
use serde_json::Value;

use crate::item::{ActionData, Item};

/// A symbol definition reported by the tree-sitter helper module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Definition {
    pub name: String,
    pub kind: String,
    pub start: StartPosition,
}

/// Start of a definition node as reported by tree-sitter: `[row, column, byte]`.
///
/// `row` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(u64, u64, u64)")]
pub struct StartPosition {
    pub row: u64,
    pub column: u64,
    pub byte: u64,
}

impl From<(u64, u64, u64)> for StartPosition {
    fn from((row, column, byte): (u64, u64, u64)) -> Self {
        Self {
            row,
            column,
            byte,
        }
    }
}

/// One element of the definitions list, decoded independently of its siblings.
///
/// Anything that does not look like a [`Definition`] is kept as raw JSON so the
/// caller can report and skip it without discarding the rest of the list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefinitionRecord {
    Definition(Definition),
    Malformed(Value),
}

impl DefinitionRecord {
    /// Build the picker item jumping to this definition in buffer `buf_nr`.
    pub fn into_item(
        self,
        buf_nr: u64,
    ) -> Result<Item, DefinitionError> {
        match self {
            Self::Definition(definition) => definition.to_item(buf_nr),
            Self::Malformed(value) => Err(DefinitionError::Malformed(value)),
        }
    }
}

impl Definition {
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.kind)
    }

    pub fn to_item(
        &self,
        buf_nr: u64,
    ) -> Result<Item, DefinitionError> {
        let line_nr = self.start.row.checked_add(1).ok_or_else(|| DefinitionError::LineOverflow {
            name: self.name.clone(),
            row: self.start.row,
        })?;

        Ok(Item {
            word: self.label(),
            action: ActionData {
                buf_nr,
                line_nr,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionError {
    Malformed(Value),
    LineOverflow {
        name: String,
        row: u64,
    },
}

impl Display for DefinitionError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "malformed definition record: {value}"),
            Self::LineOverflow {
                name,
                row,
            } => {
                write!(f, "definition '{name}' starts at row {row}, which has no one-based line number")
            },
        }
    }
}

impl std::error::Error for DefinitionError {}

#[cfg(test)]
#[path = "../tests/src/definition_tests.rs"]
mod tests;
