pub mod plan;

use crate::dataset::Dataset;
use crate::model::Model;
use crate::report::jsonl::JsonlWriter;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub use plan::{DatasetTarget, RunPlan};

/// What happened while classifying one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub dataset: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub skipped: usize,
    pub written: usize,
    pub fallbacks: usize,
    pub elapsed: Duration,
}

/// Runs a model over datasets, one row at a time
pub struct BenchmarkRunner<'a> {
    model: &'a dyn Model,
    show_progress: bool,
    prime: bool,
}

impl<'a> BenchmarkRunner<'a> {
    pub fn new(model: &'a dyn Model) -> Self {
        Self {
            model,
            show_progress: true,
            prime: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_priming(mut self, prime: bool) -> Self {
        self.prime = prime;
        self
    }

    /// Run every dataset of the plan in order
    pub async fn run_plan(&self, plan: &RunPlan) -> Result<Vec<RunOutcome>> {
        plan.validate()?;

        let mut outcomes = Vec::with_capacity(plan.datasets.len());
        for target in &plan.datasets {
            outcomes.push(self.run_dataset(target, plan.delimiter).await?);
        }
        Ok(outcomes)
    }

    /// Classify one dataset and write its predictions as JSON lines
    pub async fn run_dataset(&self, target: &DatasetTarget, delimiter: char) -> Result<RunOutcome> {
        let started = Instant::now();
        let dataset = Dataset::load(&target.path, delimiter)?;

        info!(
            "Running {} on {} ({} rows)",
            self.model.name(),
            target.path.display(),
            dataset.len()
        );

        if self.prime {
            let reply = self
                .model
                .prime()
                .await
                .context("Priming request to the model failed")?;
            debug!("Model acknowledged instructions: {}", reply.trim());
        }

        let mut writer = JsonlWriter::create(&target.output)
            .with_context(|| format!("Failed to create {}", target.output.display()))?;
        let progress = self.progress_bar(dataset.len() as u64)?;
        let mut fallbacks = 0;

        for row in dataset.rows() {
            let classification = self
                .model
                .classify(&row.input)
                .await
                .with_context(|| format!("Model request failed on line {}", row.line_number))?;

            if let Some(failure) = &classification.parse_failure {
                fallbacks += 1;
                debug!("Line {} fell back: {}", row.line_number, failure.reason());
            }

            writer.write(&classification.prediction)?;
            progress.inc(1);
        }

        let written = writer.written();
        writer.finish()?;
        progress.finish_and_clear();

        let outcome = RunOutcome {
            dataset: target.path.clone(),
            output: target.output.clone(),
            rows: dataset.len(),
            skipped: dataset.skipped(),
            written,
            fallbacks,
            elapsed: started.elapsed(),
        };

        info!(
            "Wrote {} predictions to {} ({} fallbacks)",
            outcome.written,
            outcome.output.display(),
            outcome.fallbacks
        );
        Ok(outcome)
    }

    fn progress_bar(&self, len: u64) -> Result<ProgressBar> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }

        let bar = ProgressBar::new(len);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({eta})",
            )?
            .progress_chars("#>-"),
        );
        Ok(bar)
    }
}
