use crate::benchmark::{BenchmarkRunner, DatasetTarget, RunPlan};
use crate::cli::commands::LlmArgs;
use crate::cli::utils::resolve_llm_config;
use crate::model::{Model, OllamaModel};
use crate::report::terminal::TerminalReporter;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

pub struct RunOptions {
    pub plan: Option<PathBuf>,
    pub dataset: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub delimiter: char,
    pub no_prime: bool,
    pub no_progress: bool,
    pub colors: bool,
}

impl RunOptions {
    /// Explicit plan file, else the single dataset, else the built-in plan
    fn plan(&self) -> Result<RunPlan> {
        if let Some(path) = &self.plan {
            info!("Loading run plan from {}", path.display());
            return RunPlan::load(path);
        }

        match (&self.dataset, &self.output) {
            (Some(dataset), Some(output)) => Ok(RunPlan::single(
                DatasetTarget::new(dataset, output),
                self.delimiter,
            )),
            _ => {
                info!("No plan or dataset given, using the default validation sets");
                Ok(RunPlan::default())
            }
        }
    }
}

pub async fn handle_run_command(options: RunOptions, llm: LlmArgs) -> Result<()> {
    let plan = options.plan()?;
    let config = resolve_llm_config(&llm)?;
    info!(
        "Starting run: model={}, provider={}, datasets={}",
        config.model,
        config.provider,
        plan.datasets.len()
    );

    let model = OllamaModel::from_config(config)?;
    info!("Scored fields: {}", model.prediction_metrics().join(", "));
    let runner = BenchmarkRunner::new(&model)
        .with_progress(!options.no_progress)
        .with_priming(!options.no_prime);

    let outcomes = runner.run_plan(&plan).await?;

    TerminalReporter::new()
        .with_colors(options.colors)
        .print_summary(model.name(), &outcomes);
    Ok(())
}
