use crate::cli::commands::{LlmArgs, LogFormat};
use crate::llm::LlmConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logging(verbose: bool, log_format: LogFormat) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let fmt_layer = match log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize tracing subscriber: {}", e))
}

/// Environment configuration with command-line overrides applied
pub fn resolve_llm_config(args: &LlmArgs) -> Result<LlmConfig> {
    let mut config = LlmConfig::from_env().map_err(|e| anyhow!(e))?;

    if let Some(provider) = args.provider {
        config = config.with_provider(provider);
    }
    if let Some(model) = &args.model {
        config = config.with_model(model.clone());
    }
    if let Some(host) = &args.host {
        config = config.with_api_base(host);
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }
    if args.llmdbg {
        config = config.with_debug(true);
    }

    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

pub fn print_info() {
    println!("LogPilot v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("Authors: {}", env!("CARGO_PKG_AUTHORS"));
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
    println!();
    println!("For more information, visit: {}", env!("CARGO_PKG_REPOSITORY"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmProvider;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_resolve_llm_config_overrides() {
        let args = LlmArgs {
            model: Some("deepseek-r1:70b".to_string()),
            provider: Some(LlmProvider::Openai),
            host: Some("gpu-box:11434".to_string()),
            timeout: Some(30),
            llmdbg: true,
        };

        let config = resolve_llm_config(&args).unwrap();

        assert_eq!(config.model, "deepseek-r1:70b");
        assert_eq!(config.provider, LlmProvider::Openai);
        assert_eq!(config.api_base, "http://gpu-box:11434");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.debug);
    }

    #[test]
    #[serial]
    fn test_resolve_llm_config_rejects_zero_timeout() {
        let args = LlmArgs {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(resolve_llm_config(&args).is_err());
    }
}
