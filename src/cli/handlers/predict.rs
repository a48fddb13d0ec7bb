use crate::cli::commands::LlmArgs;
use crate::cli::utils::resolve_llm_config;
use crate::llm::prompts::{build_prediction_prompt, SYSTEM_PROMPT};
use crate::model::{Model, OllamaModel};
use crate::report::terminal::TerminalReporter;
use anyhow::Result;
use tracing::info;

pub async fn handle_predict_command(
    log_line: String,
    json: bool,
    colors: bool,
    llm: LlmArgs,
) -> Result<()> {
    let config = resolve_llm_config(&llm)?;
    info!("Classifying with {} via {}", config.model, config.provider);

    let model = OllamaModel::from_config(config)?;
    let classification = model.classify(&log_line).await?;

    if let Some(failure) = &classification.parse_failure {
        info!("Model answer was not usable ({}), showing default prediction", failure);
    }

    if json {
        println!("{}", serde_json::to_string(&classification.prediction)?);
    } else {
        TerminalReporter::new()
            .with_colors(colors)
            .print_prediction(&classification.prediction);
    }

    Ok(())
}

pub fn handle_prompt_command(log_line: &str, system: bool) -> Result<()> {
    if system {
        println!("{}", SYSTEM_PROMPT);
    } else {
        println!("{}", build_prediction_prompt(log_line));
    }
    Ok(())
}
