//! Runtime settings of the source.
//!
//! Public settings structs carry defaults and `normalize()` logic; private
//! `*Patch` structs take partial JSON (or TOML) payloads and are folded in
//! with `apply_patch()`. These settings configure the host binding and the
//! logging stack only; gather itself recognizes no parameters.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;

pub const SETTINGS_SECTION_KEY: &str = "ddu-source-treesitter";
pub const DEFAULT_HOST_MODULE: &str = "ddu-source-treesitter";
pub const DEFAULT_PLUGIN: &str = "nvim-treesitter";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceSettings {
    pub host: HostSettings,
    pub logging: LoggingSettings,
}

impl SourceSettings {
    pub fn from_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<SourceSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    /// Parse settings from TOML text, using the same keys as the JSON payload.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let payload: Value = toml::from_str(text)?;
        Ok(Self::from_payload(Some(&payload)))
    }

    /// Load a settings file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|error| SettingsError::Read {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let payload: Value = serde_json::from_str(&text).map_err(|error| SettingsError::Parse {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;
            return Ok(Self::from_payload(Some(&payload)));
        }

        Self::from_toml_str(&text).map_err(|error| SettingsError::Parse {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })
    }

    fn apply_patch(
        &mut self,
        patch: SourceSettingsPatch,
    ) {
        if let Some(host) = patch.host {
            self.host.apply_patch(host);
        }
        if let Some(logging) = patch.logging {
            self.logging.apply_patch(logging);
        }
    }

    fn normalize(&mut self) {
        self.host.normalize();
        self.logging.normalize();
    }
}

/// Names used to reach the tree-sitter helper from the host's scripting layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HostSettings {
    /// Lua module implementing `is_plugin_installed`, `is_parser_installed`
    /// and `get_definitions`.
    pub module: String,
    /// Plugin whose presence gates the whole source.
    pub plugin: String,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            module: DEFAULT_HOST_MODULE.to_string(),
            plugin: DEFAULT_PLUGIN.to_string(),
        }
    }
}

impl HostSettings {
    fn apply_patch(
        &mut self,
        patch: HostSettingsPatch,
    ) {
        if let Some(module) = patch.module {
            self.module = module;
        }
        if let Some(plugin) = patch.plugin {
            self.plugin = plugin;
        }
    }

    fn normalize(&mut self) {
        self.module = self.module.trim().to_string();
        if !is_valid_lua_name(&self.module) {
            self.module = DEFAULT_HOST_MODULE.to_string();
        }

        self.plugin = self.plugin.trim().to_string();
        if !is_valid_lua_name(&self.plugin) {
            self.plugin = DEFAULT_PLUGIN.to_string();
        }
    }
}

/// Names are spliced into a single-quoted Lua string nested in a
/// double-quoted Vim string, so quotes and backslashes are never allowed.
fn is_valid_lua_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    /// Optional log file; stderr is always written.
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(file) = patch.file {
            self.file = Some(PathBuf::from(file));
        }
    }

    fn normalize(&mut self) {
        if self.file.as_ref().is_some_and(|file| file.as_os_str().is_empty()) {
            self.file = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Read {
        path: PathBuf,
        reason: String,
    },
    Parse {
        path: PathBuf,
        reason: String,
    },
}

impl Display for SettingsError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Read {
                path,
                reason,
            } => {
                write!(f, "failed to read settings file {}: {reason}", path.display())
            },
            Self::Parse {
                path,
                reason,
            } => {
                write!(f, "invalid settings file {}: {reason}", path.display())
            },
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SourceSettingsPatch {
    host: Option<HostSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct HostSettingsPatch {
    module: Option<String>,
    plugin: Option<String>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LoggingSettingsPatch {
    level: Option<LogLevel>,
    file: Option<String>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());

    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }

    candidates
}

#[cfg(test)]
#[path = "../tests/src/settings_tests.rs"]
mod tests;
