//! Structured error types shared across SMC crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SmcError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (counts, dimensions, etc.).
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

/// Canonical error type for the SMC engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SmcError {
    /// Invalid construction-time configuration: particle counts, prior
    /// specifications, filter settings.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Degenerate sampling input, e.g. an all-zero categorical weight vector.
    #[error("sampling error: {0}")]
    Sampling(ErrorInfo),
    /// Serialization and report I/O errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
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

impl SmcError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SmcError::Config(info) | SmcError::Sampling(info) | SmcError::Serde(info) => info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_roundtrip_through_json() {
        let err = SmcError::Config(
            ErrorInfo::new("prior-length-mismatch", "lengths differ")
                .with_context("means", "2")
                .with_context("sds", "3")
                .with_hint("supply one sd per mean"),
        );
        let json = serde_json::to_string(&err).unwrap();
        let back: SmcError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn display_includes_code_context_and_hint() {
        let err = SmcError::Sampling(
            ErrorInfo::new("categorical-degenerate", "zero total")
                .with_context("len", "4")
                .with_hint("weights must not all be zero"),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("categorical-degenerate"));
        assert!(rendered.contains("len=4"));
        assert!(rendered.contains("weights must not all be zero"));
    }
}
