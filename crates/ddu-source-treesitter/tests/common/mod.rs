#![allow(dead_code)]

use std::{cell::RefCell, path::PathBuf};

use ddu_source_treesitter::{HostError, HostRuntime};
use serde_json::Value;

/// Runtime answering by host function name, recording every expression.
#[derive(Default)]
pub struct ScriptedRuntime {
    answers: Vec<(&'static str, Result<Value, HostError>)>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every expression calling `function` with `value`.
    pub fn answer(
        mut self,
        function: &'static str,
        value: Value,
    ) -> Self {
        self.answers.push((function, Ok(value)));
        self
    }

    pub fn fail(
        mut self,
        function: &'static str,
        reason: &str,
    ) -> Self {
        self.answers.push((
            function,
            Err(HostError::Evaluation {
                expression: function.to_string(),
                reason: reason.to_string(),
            }),
        ));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Names of the host functions called, in order.
    pub fn called_functions(&self) -> Vec<&'static str> {
        const FUNCTIONS: [&str; 3] = ["is_plugin_installed", "is_parser_installed", "get_definitions"];
        self.calls
            .borrow()
            .iter()
            .filter_map(|expression| {
                FUNCTIONS
                    .into_iter()
                    .find(|function| expression.contains(&format!(".{function}(")))
            })
            .collect()
    }
}

impl HostRuntime for ScriptedRuntime {
    async fn eval(
        &self,
        expression: &str,
    ) -> Result<Value, HostError> {
        self.calls.borrow_mut().push(expression.to_string());
        self.answers
            .iter()
            .find(|(function, _)| expression.contains(&format!(".{function}(")))
            .map(|(_, answer)| answer.clone())
            .unwrap_or_else(|| {
                Err(HostError::Evaluation {
                    expression: expression.to_string(),
                    reason: "no scripted answer".to_string(),
                })
            })
    }
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}
