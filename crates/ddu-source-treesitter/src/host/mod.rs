//! Boundary between the source and the editor process.
//!
//! [`HostRuntime`] is the single untyped primitive the editor offers: evaluate
//! an expression in its scripting layer and hand back the decoded value.
//! [`TreesitterHost`] is the typed capability interface the source programs
//! against; [`LuaTreesitterHost`] implements it on top of any runtime by
//! building `luaeval(...)` expressions and checking the shape of each answer.

mod error;
mod lua;
mod replay;

use std::future::Future;

use serde_json::Value;

pub use error::HostError;
pub use lua::LuaTreesitterHost;
pub use replay::{BufferFixture, ReplayError, ReplayFixture, ReplayHost};

use crate::definition::DefinitionRecord;

/// Expression evaluation in the host editor's scripting layer.
pub trait HostRuntime {
    fn eval(
        &self,
        expression: &str,
    ) -> impl Future<Output = Result<Value, HostError>>;
}

/// Queries the source needs from the tree-sitter integration of the host.
pub trait TreesitterHost {
    fn is_plugin_installed(&self) -> impl Future<Output = Result<bool, HostError>>;

    fn is_parser_installed(
        &self,
        buf_nr: u64,
    ) -> impl Future<Output = Result<bool, HostError>>;

    fn get_definitions(
        &self,
        buf_nr: u64,
    ) -> impl Future<Output = Result<Vec<DefinitionRecord>, HostError>>;
}

/// JSON type name of `value`, for type-check error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
