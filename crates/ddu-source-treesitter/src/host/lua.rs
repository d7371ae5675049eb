use serde_json::Value;
use tracing::debug;

use super::{HostError, HostRuntime, TreesitterHost, value_kind};
use crate::{definition::DefinitionRecord, settings::HostSettings};

/// [`TreesitterHost`] backed by the Lua helper module of the plugin.
///
/// Every query becomes one `luaeval("require('<module>').<fn>(...)")`
/// expression handed to the runtime; the answer is type-checked before use.
#[derive(Debug, Clone)]
pub struct LuaTreesitterHost<R> {
    runtime: R,
    settings: HostSettings,
}

impl<R: HostRuntime> LuaTreesitterHost<R> {
    pub fn new(runtime: R) -> Self {
        Self::with_settings(runtime, HostSettings::default())
    }

    pub fn with_settings(
        runtime: R,
        settings: HostSettings,
    ) -> Self {
        Self {
            runtime,
            settings,
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    pub fn plugin_check_expression(&self) -> String {
        self.module_call(&format!("is_plugin_installed('{}')", self.settings.plugin))
    }

    pub fn parser_check_expression(
        &self,
        buf_nr: u64,
    ) -> String {
        self.module_call(&format!("is_parser_installed({buf_nr})"))
    }

    pub fn definitions_expression(
        &self,
        buf_nr: u64,
    ) -> String {
        self.module_call(&format!("get_definitions({buf_nr})"))
    }

    fn module_call(
        &self,
        call: &str,
    ) -> String {
        format!("luaeval(\"require('{}').{call}\")", self.settings.module)
    }

    async fn eval_bool(
        &self,
        expression: String,
    ) -> Result<bool, HostError> {
        debug!("[host] eval {expression}");
        let value = self.runtime.eval(&expression).await?;
        ensure_bool(expression, value)
    }
}

impl<R: HostRuntime> TreesitterHost for LuaTreesitterHost<R> {
    async fn is_plugin_installed(&self) -> Result<bool, HostError> {
        self.eval_bool(self.plugin_check_expression()).await
    }

    async fn is_parser_installed(
        &self,
        buf_nr: u64,
    ) -> Result<bool, HostError> {
        self.eval_bool(self.parser_check_expression(buf_nr)).await
    }

    async fn get_definitions(
        &self,
        buf_nr: u64,
    ) -> Result<Vec<DefinitionRecord>, HostError> {
        let expression = self.definitions_expression(buf_nr);
        debug!("[host] eval {expression}");
        let value = self.runtime.eval(&expression).await?;
        ensure_definitions(expression, value)
    }
}

fn ensure_bool(
    expression: String,
    value: Value,
) -> Result<bool, HostError> {
    match value {
        Value::Bool(answer) => Ok(answer),
        other => Err(HostError::UnexpectedType {
            expression,
            expected: "boolean",
            found: value_kind(&other),
        }),
    }
}

/// Only the outer list is checked here. Elements are decoded one by one so a
/// bad record can be skipped later without losing its siblings.
fn ensure_definitions(
    expression: String,
    value: Value,
) -> Result<Vec<DefinitionRecord>, HostError> {
    let found = value_kind(&value);
    let Value::Array(elements) = value else {
        return Err(HostError::UnexpectedType {
            expression,
            expected: "array of definitions",
            found,
        });
    };

    Ok(elements
        .into_iter()
        .map(|element| {
            serde_json::from_value(element.clone()).unwrap_or(DefinitionRecord::Malformed(element))
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/src/host/lua_tests.rs"]
mod tests;
