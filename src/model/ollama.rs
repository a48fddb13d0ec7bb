use super::{Classification, Model, ModelResult};
use crate::llm::prompts::{build_prediction_prompt, SYSTEM_PROMPT};
use crate::llm::{ChatBackend, ChatMessage, LlmConfig, LlmService};
use crate::prediction::parser::parse_or_fallback;
use async_trait::async_trait;
use tracing::debug;

const PREDICTION_METRICS: &[&str] = &["error_type", "severity"];

/// Log classifier backed by a reasoning model served from Ollama
pub struct OllamaModel {
    backend: Box<dyn ChatBackend>,
}

impl OllamaModel {
    pub fn new(backend: Box<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Build a model talking to the server described by `config`
    pub fn from_config(config: LlmConfig) -> ModelResult<Self> {
        Ok(Self::new(Box::new(LlmService::new(config)?)))
    }
}

#[async_trait]
impl Model for OllamaModel {
    fn name(&self) -> &str {
        self.backend.model_name()
    }

    fn prediction_metrics(&self) -> &'static [&'static str] {
        PREDICTION_METRICS
    }

    async fn prime(&self) -> ModelResult<String> {
        let reply = self
            .backend
            .chat(vec![ChatMessage::system(SYSTEM_PROMPT)])
            .await?;
        debug!("Priming reply from {}: {} chars", self.name(), reply.len());
        Ok(reply)
    }

    async fn classify(&self, text: &str) -> ModelResult<Classification> {
        let prompt = build_prediction_prompt(text);
        let response = self.backend.chat(vec![ChatMessage::user(&prompt)]).await?;
        debug!("Raw response: {}", response);

        let (prediction, parse_failure) = parse_or_fallback(text, &response);
        Ok(Classification {
            prediction,
            parse_failure,
        })
    }
}
