//! Structured error types shared across the workspace.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HhcfError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (parameter names, values, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the correlation pipeline and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HhcfError {
    /// Unknown spectrum model, transform method or normalization tag.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// Physical constant or grid size outside its admissible range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// Division by zero, overflow or non-finite values during evaluation.
    #[error("numerical error: {0}")]
    Numerical(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Filesystem errors raised by persistence collaborators.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HhcfError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HhcfError::Configuration(info)
            | HhcfError::InvalidParameter(info)
            | HhcfError::Numerical(info)
            | HhcfError::Serde(info)
            | HhcfError::Io(info) => info,
        }
    }

    /// Shorthand for an [`HhcfError::InvalidParameter`] naming the offending parameter.
    pub fn invalid_parameter(name: &str, value: impl Display, message: impl Into<String>) -> Self {
        HhcfError::InvalidParameter(
            ErrorInfo::new("invalid-parameter", message)
                .with_context("parameter", name)
                .with_context("value", value.to_string()),
        )
    }

    /// Shorthand for an [`HhcfError::Configuration`] naming an unknown identifier.
    pub fn unknown_identifier(kind: &str, value: &str, known: &[&str]) -> Self {
        HhcfError::Configuration(
            ErrorInfo::new("unknown-identifier", format!("unknown {kind} '{value}'"))
                .with_context("kind", kind)
                .with_context("value", value)
                .with_hint(format!("expected one of: {}", known.join(", "))),
        )
    }
}
