use crate::llm::config::{LlmConfig, LlmProvider};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur talking to the model server
#[derive(Debug, Error)]
pub enum LlmServiceError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Anything that can answer a chat request with raw text
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the messages as one request and return the reply content
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmServiceError>;

    /// Model name the backend talks to
    fn model_name(&self) -> &str;
}

enum Transport {
    Ollama(reqwest::Client),
    OpenAi(Client<OpenAIConfig>),
}

/// Service for talking to a local Ollama server
pub struct LlmService {
    transport: Transport,
    config: LlmConfig,
}

impl LlmService {
    /// Create a new LLM service from configuration
    pub fn new(config: LlmConfig) -> Result<Self, LlmServiceError> {
        config.validate().map_err(LlmServiceError::ConfigError)?;

        let transport = match config.provider {
            LlmProvider::Ollama => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.timeout_secs))
                    .build()
                    .map_err(|e| LlmServiceError::ConfigError(e.to_string()))?;
                Transport::Ollama(client)
            }
            LlmProvider::Openai => {
                let openai_config = OpenAIConfig::new()
                    .with_api_key(&config.api_key)
                    .with_api_base(config.openai_base());
                Transport::OpenAi(Client::with_config(openai_config))
            }
        };

        Ok(Self { transport, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn chat_ollama(
        &self,
        client: &reqwest::Client,
        messages: &[ChatMessage],
    ) -> Result<String, LlmServiceError> {
        let request = OllamaChatRequest::new(&self.config, messages);

        let response = client
            .post(self.config.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmServiceError::ApiError(format!("{}: {}", status, body.trim())));
        }

        let reply: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmServiceError::ParseError(e.to_string()))?;

        Ok(reply.into_content())
    }

    async fn chat_openai(
        &self,
        client: &Client<OpenAIConfig>,
        messages: Vec<ChatMessage>,
    ) -> Result<String, LlmServiceError> {
        let openai_messages = messages
            .into_iter()
            .map(|msg| msg.into_openai_message())
            .collect::<Result<Vec<_>, _>>()
            .map_err(LlmServiceError::Other)?;

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.config.model)
            .messages(openai_messages);

        if let Some(max_tokens) = self.config.max_tokens {
            request_builder.max_completion_tokens(max_tokens);
        }
        if let Some(temperature) = self.config.temperature {
            request_builder.temperature(temperature);
        }

        let request = request_builder
            .build()
            .map_err(|e| LlmServiceError::ApiError(e.to_string()))?;

        let response = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            client.chat().create(request),
        )
        .await
        .map_err(|_| LlmServiceError::Timeout)?
        .map_err(|e| LlmServiceError::ApiError(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmServiceError::ParseError("No choices in response".to_string()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl ChatBackend for LlmService {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmServiceError> {
        if self.config.debug {
            tracing::debug!(
                "Sending request to {}: model={}, messages_count={}",
                self.config.provider,
                self.config.model,
                messages.len()
            );
        }

        let content = match &self.transport {
            Transport::Ollama(client) => self.chat_ollama(client, &messages).await?,
            Transport::OpenAi(client) => self.chat_openai(client, messages).await?,
        };

        if self.config.debug {
            tracing::debug!("Received response: {} chars", content.len());
        }

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

fn map_transport_error(e: reqwest::Error) -> LlmServiceError {
    if e.is_timeout() {
        LlmServiceError::Timeout
    } else {
        LlmServiceError::ApiError(e.to_string())
    }
}

/// Chat message for LLM interactions
#[derive(Debug, Clone, PartialEq)]
pub enum ChatMessage {
    System(String),
    User(String),
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self::System(content.to_string())
    }

    pub fn user(content: &str) -> Self {
        Self::User(content.to_string())
    }

    pub fn role(&self) -> &'static str {
        match self {
            ChatMessage::System(_) => "system",
            ChatMessage::User(_) => "user",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ChatMessage::System(content) | ChatMessage::User(content) => content,
        }
    }

    fn into_openai_message(self) -> Result<ChatCompletionRequestMessage, String> {
        match self {
            ChatMessage::System(content) => ChatCompletionRequestSystemMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::System)
                .map_err(|e| e.to_string()),
            ChatMessage::User(content) => ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::User)
                .map_err(|e| e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

impl<'a> OllamaChatRequest<'a> {
    fn new(config: &'a LlmConfig, messages: &'a [ChatMessage]) -> Self {
        let options = if config.temperature.is_some() || config.max_tokens.is_some() {
            Some(OllamaOptions {
                temperature: config.temperature,
                num_predict: config.max_tokens,
            })
        } else {
            None
        };

        Self {
            model: &config.model,
            messages: messages
                .iter()
                .map(|m| OllamaMessage {
                    role: m.role(),
                    content: m.content(),
                })
                .collect(),
            stream: false,
            options,
        }
    }
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    message: Option<OllamaReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaReplyMessage {
    #[serde(default)]
    content: String,
}

impl OllamaChatResponse {
    /// A reply without a message reads as empty text
    fn into_content(self) -> String {
        self.message.map(|m| m.content).unwrap_or_default()
    }
}
