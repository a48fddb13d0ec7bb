use crate::llm::LlmConfig;
use anyhow::Result;
use std::env;

pub fn handle_config_command() -> Result<()> {
    let env_file_loaded = dotenv::dotenv().is_ok();

    println!("🔧 LogPilot Configuration");
    println!("═══════════════════════════════════════");
    println!();

    println!("📦 Version Information:");
    println!("  • LogPilot: v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("🌍 Environment Configuration:");
    if env_file_loaded {
        println!("  • .env file: ✅ Loaded");
    } else {
        println!("  • .env file: ⚠️  Not found (using system environment)");
    }

    for var in [
        "LLM_PROVIDER",
        "OLLAMA_HOST",
        "OLLAMA_MODEL",
        "LLM_REQUEST_TIMEOUT",
        "LLM_MAX_TOKENS",
        "LLM_TEMPERATURE",
        "LLM_DEBUG",
        "RUST_LOG",
    ] {
        match env::var(var) {
            Ok(val) => println!("  • {}: {}", var, val),
            Err(_) => println!("  • {}: (default)", var),
        }
    }
    match env::var("OLLAMA_API_KEY") {
        Ok(_) => println!("  • OLLAMA_API_KEY: ✅ Set (hidden)"),
        Err(_) => println!("  • OLLAMA_API_KEY: (default)"),
    }
    println!();

    println!("🤖 Effective Model Server:");
    match LlmConfig::from_env() {
        Ok(config) => {
            println!("  • Provider: {}", config.provider);
            println!("  • Model: {}", config.model);
            println!("  • Base URL: {}", config.api_base);
            println!("  • Timeout: {} seconds", config.timeout_secs);
            match config.max_tokens {
                Some(tokens) => println!("  • Max tokens: {}", tokens),
                None => println!("  • Max tokens: server default"),
            }
            match config.temperature {
                Some(temperature) => println!("  • Temperature: {}", temperature),
                None => println!("  • Temperature: server default"),
            }
            if let Err(e) = config.validate() {
                println!("  • Validation: ❌ {}", e);
            } else {
                println!("  • Validation: ✅ OK");
            }
        }
        Err(e) => println!("  • ❌ {}", e),
    }

    println!();
    println!("💡 Tips:");
    println!("  • Start the server with `ollama serve` and pull the model first");
    println!("  • Use --verbose or RUST_LOG=debug to see raw model responses");

    Ok(())
}
