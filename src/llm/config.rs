use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Wire protocol used to reach the model server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Native Ollama chat endpoint (`/api/chat`)
    Ollama,
    /// OpenAI-compatible chat completions served under `/v1`
    Openai,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Ollama => write!(f, "ollama"),
            LlmProvider::Openai => write!(f, "openai"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" => Ok(LlmProvider::Openai),
            other => Err(format!("Unknown LLM provider '{}', expected 'ollama' or 'openai'", other)),
        }
    }
}

/// Configuration for the model server connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Which wire protocol to speak
    pub provider: LlmProvider,

    /// Model to use (e.g., "deepseek-r1:8b", "deepseek-r1:70b")
    pub model: String,

    /// Base URL of the model server, without the API path
    pub api_base: String,

    /// API key sent on the OpenAI-compatible endpoint. Ollama ignores it.
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Upper bound on generated tokens, server default when unset
    pub max_tokens: Option<u32>,

    /// Sampling temperature, server default when unset
    pub temperature: Option<f32>,

    /// Enable debug logging of request/response sizes
    pub debug: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Ollama,
            model: "deepseek-r1:8b".to_string(),
            api_base: "http://localhost:11434".to_string(),
            api_key: "ollama".to_string(),
            // Reasoning models spend minutes thinking on large weights
            timeout_secs: 600,
            max_tokens: None,
            temperature: None,
            debug: false,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_env_internal(true)
    }

    /// Load configuration from environment variables with optional dotenv loading
    #[cfg(test)]
    fn from_env_no_dotenv() -> Result<Self, String> {
        Self::from_env_internal(false)
    }

    fn from_env_internal(load_dotenv: bool) -> Result<Self, String> {
        if load_dotenv {
            let _ = dotenv::dotenv();
        }

        let mut config = Self::default();

        if let Ok(provider) = env::var("LLM_PROVIDER") {
            config.provider = provider.parse()?;
        }

        if let Ok(model) = env::var("OLLAMA_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }

        if let Ok(host) = env::var("OLLAMA_HOST") {
            config.api_base = normalize_base(&host);
        }

        if let Ok(api_key) = env::var("OLLAMA_API_KEY") {
            config.api_key = api_key;
        }

        if let Ok(timeout) = env::var("LLM_REQUEST_TIMEOUT") {
            if let Ok(timeout_secs) = timeout.parse::<u64>() {
                config.timeout_secs = timeout_secs;
            }
        }

        if let Ok(max_tokens) = env::var("LLM_MAX_TOKENS") {
            if let Ok(tokens) = max_tokens.parse::<u32>() {
                config.max_tokens = Some(tokens);
            }
        }

        if let Ok(temperature) = env::var("LLM_TEMPERATURE") {
            if let Ok(temp) = temperature.parse::<f32>() {
                if (0.0..=2.0).contains(&temp) {
                    config.temperature = Some(temp);
                }
            }
        }

        if let Ok(debug) = env::var("LLM_DEBUG") {
            config.debug = debug.to_lowercase() == "true" || debug == "1";
        }

        Ok(config)
    }

    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = normalize_base(api_base);
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Native chat endpoint URL
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.api_base)
    }

    /// Base URL handed to the OpenAI-compatible client
    pub fn openai_base(&self) -> String {
        if self.api_base.ends_with("/v1") {
            self.api_base.clone()
        } else {
            format!("{}/v1", self.api_base)
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name is empty".to_string());
        }

        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(format!("API base must be an http(s) URL, got '{}'", self.api_base));
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_tokens == Some(0) {
            return Err("Max tokens must be greater than 0".to_string());
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!("Temperature must be between 0.0 and 2.0, got {}", temperature));
            }
        }

        if !self.model.to_lowercase().contains("r1") {
            tracing::warn!(
                "Model '{}' may not emit a </think> section; answers without it fall back to the default prediction",
                self.model
            );
        }

        Ok(())
    }
}

/// Accepts `host:port` as Ollama does and strips trailing slashes
fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();

        assert_eq!(config.provider, LlmProvider::Ollama);
        assert_eq!(config.model, "deepseek-r1:8b");
        assert_eq!(config.api_base, "http://localhost:11434");
        assert_eq!(config.timeout_secs, 600);
        assert_eq!(config.max_tokens, None);
        assert_eq!(config.temperature, None);
        assert!(!config.debug);
    }

    #[test]
    fn test_urls() {
        let config = LlmConfig::default();
        assert_eq!(config.chat_url(), "http://localhost:11434/api/chat");
        assert_eq!(config.openai_base(), "http://localhost:11434/v1");

        let config = LlmConfig::default().with_api_base("http://gpu-box:11434/v1/");
        assert_eq!(config.openai_base(), "http://gpu-box:11434/v1");
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("127.0.0.1:11434"), "http://127.0.0.1:11434");
        assert_eq!(normalize_base("https://models.local/"), "https://models.local");
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("OLLAMA".parse::<LlmProvider>(), Ok(LlmProvider::Ollama));
        assert_eq!("openai".parse::<LlmProvider>(), Ok(LlmProvider::Openai));
        assert!("anthropic".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_validate_success() {
        let config = LlmConfig::default().with_model("deepseek-r1:70b");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_model() {
        let config = LlmConfig::default().with_model("  ");

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Model name is empty"));
    }

    #[test]
    fn test_validate_invalid_temperature() {
        let config = LlmConfig {
            temperature: Some(2.5),
            ..Default::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Temperature must be between"));
    }

    #[test]
    fn test_validate_zero_max_tokens() {
        let config = LlmConfig {
            max_tokens: Some(0),
            ..Default::default()
        };

        let result = config.validate();
        assert!(result.unwrap_err().contains("Max tokens must be greater than 0"));
    }

    #[test]
    fn test_validate_bad_base() {
        let config = LlmConfig {
            api_base: "ftp://models".to_string(),
            ..Default::default()
        };

        assert!(config.validate().unwrap_err().contains("http(s) URL"));
    }

    fn setup_clean_env() {
        env::remove_var("LLM_PROVIDER");
        env::remove_var("OLLAMA_MODEL");
        env::remove_var("OLLAMA_HOST");
        env::remove_var("OLLAMA_API_KEY");
        env::remove_var("LLM_REQUEST_TIMEOUT");
        env::remove_var("LLM_MAX_TOKENS");
        env::remove_var("LLM_TEMPERATURE");
        env::remove_var("LLM_DEBUG");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        setup_clean_env();

        let config = LlmConfig::from_env_no_dotenv().unwrap();
        assert_eq!(config.model, "deepseek-r1:8b");
        assert_eq!(config.provider, LlmProvider::Ollama);
    }

    #[test]
    #[serial]
    fn test_from_env_with_overrides() {
        setup_clean_env();

        env::set_var("LLM_PROVIDER", "openai");
        env::set_var("OLLAMA_MODEL", "deepseek-r1:70b");
        env::set_var("OLLAMA_HOST", "gpu-box:11434");
        env::set_var("OLLAMA_API_KEY", "secret");
        env::set_var("LLM_REQUEST_TIMEOUT", "120");
        env::set_var("LLM_MAX_TOKENS", "2000");
        env::set_var("LLM_TEMPERATURE", "0.7");
        env::set_var("LLM_DEBUG", "true");

        let config = LlmConfig::from_env_no_dotenv().unwrap();
        assert_eq!(config.provider, LlmProvider::Openai);
        assert_eq!(config.model, "deepseek-r1:70b");
        assert_eq!(config.api_base, "http://gpu-box:11434");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.max_tokens, Some(2000));
        assert_eq!(config.temperature, Some(0.7));
        assert!(config.debug);

        setup_clean_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_numeric_values() {
        setup_clean_env();

        env::set_var("LLM_REQUEST_TIMEOUT", "invalid");
        env::set_var("LLM_MAX_TOKENS", "not-a-number");
        env::set_var("LLM_TEMPERATURE", "9.0");

        let config = LlmConfig::from_env_no_dotenv().unwrap();
        assert_eq!(config.timeout_secs, 600);
        assert_eq!(config.max_tokens, None);
        assert_eq!(config.temperature, None);

        setup_clean_env();
    }

    #[test]
    #[serial]
    fn test_from_env_unknown_provider() {
        setup_clean_env();
        env::set_var("LLM_PROVIDER", "bedrock");

        let result = LlmConfig::from_env_no_dotenv();
        assert!(result.unwrap_err().contains("Unknown LLM provider"));

        setup_clean_env();
    }

    #[test]
    #[serial]
    fn test_debug_flag_parsing() {
        setup_clean_env();

        env::set_var("LLM_DEBUG", "1");
        assert!(LlmConfig::from_env_no_dotenv().unwrap().debug);

        env::set_var("LLM_DEBUG", "false");
        assert!(!LlmConfig::from_env_no_dotenv().unwrap().debug);

        setup_clean_env();
    }
}
