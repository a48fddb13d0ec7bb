pub mod extract;
pub mod parser;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use parser::parse_prediction;

/// Classification of what a log line reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    NoError,
    Warning,
    Runtime,
    Fatal,
}

impl ErrorType {
    pub const ALL: [ErrorType; 4] = [
        ErrorType::NoError,
        ErrorType::Warning,
        ErrorType::Runtime,
        ErrorType::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::NoError => "no_error",
            ErrorType::Warning => "warning",
            ErrorType::Runtime => "runtime",
            ErrorType::Fatal => "fatal",
        }
    }

    /// Exact label match, as the model is told to answer
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgent the log line is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Notice,
    Warn,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Notice, Severity::Warn, Severity::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Notice => "notice",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured classification and explanation of one log line.
///
/// Field order matches the serialized record: `input, error_type,
/// severity, description, solution`. Unset fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    input: String,
    error_type: Option<ErrorType>,
    severity: Option<Severity>,
    description: Option<String>,
    solution: Option<String>,
}

impl Prediction {
    pub fn new(
        input: impl Into<String>,
        error_type: Option<ErrorType>,
        severity: Option<Severity>,
        description: Option<String>,
        solution: Option<String>,
    ) -> Self {
        Self {
            input: input.into(),
            error_type,
            severity,
            description,
            solution,
        }
    }

    /// The benign record used when the model answer cannot be parsed
    pub fn fallback(input: impl Into<String>) -> Self {
        Self::new(
            input,
            Some(ErrorType::NoError),
            Some(Severity::Notice),
            Some(String::new()),
            Some(String::new()),
        )
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }
}

/// The model answer could not be turned into a prediction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable model response: {reason}")]
pub struct ParseFailure {
    reason: String,
}

impl ParseFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
