pub mod ollama;

use crate::llm::LlmServiceError;
use crate::prediction::{ParseFailure, Prediction};
use async_trait::async_trait;

pub use ollama::OllamaModel;

/// Result type for model operations
pub type ModelResult<T> = Result<T, LlmServiceError>;

/// A prediction together with the parse failure that produced it, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub prediction: Prediction,
    pub parse_failure: Option<ParseFailure>,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        self.parse_failure.is_some()
    }
}

/// A model that can be benchmarked on log lines
#[async_trait]
pub trait Model: Send + Sync {
    /// Model identifier
    fn name(&self) -> &str;

    /// Fields the scorer compares against the expected labels
    fn prediction_metrics(&self) -> &'static [&'static str];

    /// One-off call made before a run; returns the model's reply
    async fn prime(&self) -> ModelResult<String>;

    /// Classify a log line, reporting whether the default was substituted
    async fn classify(&self, text: &str) -> ModelResult<Classification>;

    /// Classify a log line
    async fn predict(&self, text: &str) -> ModelResult<Prediction> {
        Ok(self.classify(text).await?.prediction)
    }
}
