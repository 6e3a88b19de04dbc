//! Structured error types shared across the flow crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`FlowError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (harmonics, powers, orders, sizes).
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
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the flow harmonics engine.
///
/// `Config` and `Bounds` are fatal: they describe a correlator setup that can
/// never be evaluated. `Insufficient` is only surfaced by APIs that evaluate a
/// single correlator on demand; the event pipeline counts those cases instead
/// of returning them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum FlowError {
    /// Invalid analysis configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Harmonic or power outside the Q-vector table.
    #[error("bounds error: {0}")]
    Bounds(ErrorInfo),
    /// Not enough particles to evaluate a correlator.
    #[error("insufficient statistics: {0}")]
    Insufficient(ErrorInfo),
    /// Inconsistent per-particle weights.
    #[error("weights error: {0}")]
    Weights(ErrorInfo),
    /// Randomness and seeding errors.
    #[error("rng error: {0}")]
    Rng(ErrorInfo),
    /// Serialization, schema and I/O errors.
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

impl FlowError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            FlowError::Config(info)
            | FlowError::Bounds(info)
            | FlowError::Insufficient(info)
            | FlowError::Weights(info)
            | FlowError::Rng(info)
            | FlowError::Serde(info) => info,
        }
    }

    /// True for errors that abort processing (as opposed to per-event skips).
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FlowError::Insufficient(_))
    }
}
