use serde::Deserialize;

use crate::error::EngineError;

/// What Expand does with an `Unknown` symbolic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy {
    /// Abort with `ErrorKind::UnknownValue`.
    #[default]
    Fail,
    /// Write nil / the native zero value.
    Zero,
}

/// What Expand does when a 64-bit number lands in a 32-bit native field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrowingPolicy {
    /// Plain `as` cast; out-of-range values wrap or saturate silently.
    #[default]
    Truncate,
    /// Out-of-range values abort with `ErrorKind::TypeMismatch`.
    Checked,
}

/// Per-engine conversion behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ConversionOptions {
    #[serde(default)]
    pub unknown: UnknownPolicy,
    #[serde(default)]
    pub narrowing: NarrowingPolicy,
}

/// Root configuration, parsed from TOML.
///
/// ```toml
/// [conversion]
/// unknown = "zero"
/// narrowing = "checked"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlexConfig {
    #[serde(default)]
    pub conversion: ConversionOptions,
}

impl FlexConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(format!("{path}: {e}")))?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }
}
