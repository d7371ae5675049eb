//! A [`HostRuntime`] that answers from a recorded fixture instead of a live
//! editor. Used by the CLI to inspect what the source would emit for a
//! captured buffer.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{HostError, HostRuntime};

static MODULE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^luaeval\("require\('(?P<module>[^']+)'\)\.(?P<function>\w+)\((?P<args>[^)]*)\)"\)$"#)
        .expect("module call pattern is valid")
});

/// Recorded host answers.
///
/// ```json
/// { "pluginInstalled": true,
///   "buffers": { "3": { "parserInstalled": true, "definitions": [] } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplayFixture {
    pub plugin_installed: bool,
    pub buffers: HashMap<u64, BufferFixture>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BufferFixture {
    pub parser_installed: bool,
    /// Returned verbatim, so fixtures may hold malformed answers too.
    pub definitions: Value,
}

impl Default for BufferFixture {
    fn default() -> Self {
        Self {
            parser_installed: false,
            definitions: Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReplayHost {
    fixture: ReplayFixture,
}

impl ReplayHost {
    pub fn new(fixture: ReplayFixture) -> Self {
        Self {
            fixture,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self::new)
    }

    pub async fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|error| ReplayError::Read {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;
        Self::from_json(&text).map_err(|error| ReplayError::Parse {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })
    }

    pub fn fixture(&self) -> &ReplayFixture {
        &self.fixture
    }

    fn answer(
        &self,
        expression: &str,
    ) -> Result<Value, HostError> {
        let evaluation_error = |reason: String| HostError::Evaluation {
            expression: expression.to_string(),
            reason,
        };

        let captures = MODULE_CALL
            .captures(expression)
            .ok_or_else(|| evaluation_error("not a recorded module call".to_string()))?;
        let function = &captures["function"];
        let args = captures["args"].trim();

        match function {
            "is_plugin_installed" => Ok(Value::Bool(self.fixture.plugin_installed)),
            "is_parser_installed" | "get_definitions" => {
                let buf_nr: u64 = args
                    .parse()
                    .map_err(|_| evaluation_error(format!("invalid buffer number `{args}`")))?;
                let buffer = self.fixture.buffers.get(&buf_nr);
                if function == "is_parser_installed" {
                    Ok(Value::Bool(buffer.is_some_and(|buffer| buffer.parser_installed)))
                } else {
                    Ok(buffer.map(|buffer| buffer.definitions.clone()).unwrap_or_else(|| Value::Array(Vec::new())))
                }
            },
            other => Err(evaluation_error(format!(
                "{}.{other} is not recorded",
                &captures["module"]
            ))),
        }
    }
}

impl HostRuntime for ReplayHost {
    async fn eval(
        &self,
        expression: &str,
    ) -> Result<Value, HostError> {
        let answer = self.answer(expression);
        debug!("[replay] {expression} -> {answer:?}");
        answer
    }
}

#[derive(Debug)]
pub enum ReplayError {
    Read {
        path: PathBuf,
        reason: String,
    },
    Parse {
        path: PathBuf,
        reason: String,
    },
}

impl Display for ReplayError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Read {
                path,
                reason,
            } => {
                write!(f, "failed to read fixture {}: {reason}", path.display())
            },
            Self::Parse {
                path,
                reason,
            } => {
                write!(f, "invalid fixture {}: {reason}", path.display())
            },
        }
    }
}

impl std::error::Error for ReplayError {}

#[cfg(test)]
#[path = "../../tests/src/host/replay_tests.rs"]
mod tests;
