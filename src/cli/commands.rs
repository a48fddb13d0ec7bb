use crate::llm::LlmProvider;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logpilot",
    about = "Log line classification harness backed by a local reasoning model",
    version,
    author
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Disable colored terminal output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single log line
    Predict {
        /// The raw log line
        #[arg(value_name = "LOG_LINE")]
        log_line: String,

        /// Print the prediction as a JSON line instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Classify every line of one or more datasets and write predictions
    Run {
        /// YAML run plan listing datasets and output files
        #[arg(short, long, conflicts_with_all = ["dataset", "output"])]
        plan: Option<PathBuf>,

        /// Single pipe-delimited dataset to classify
        #[arg(short, long, requires = "output")]
        dataset: Option<PathBuf>,

        /// Predictions file for --dataset
        #[arg(short, long, requires = "dataset")]
        output: Option<PathBuf>,

        /// Column delimiter for --dataset
        #[arg(long, default_value = "|")]
        delimiter: char,

        /// Skip the system-prompt priming call
        #[arg(long)]
        no_prime: bool,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Print the prompt that would be sent for a log line
    Prompt {
        /// The raw log line
        #[arg(value_name = "LOG_LINE")]
        log_line: String,

        /// Print the priming system prompt instead
        #[arg(long)]
        system: bool,
    },

    /// Display the effective model server configuration
    Config,

    /// Show information about LogPilot
    Info,
}

/// Overrides for the environment-derived model configuration
#[derive(Args, Debug, Clone, Default)]
pub struct LlmArgs {
    /// Model name, e.g. deepseek-r1:70b
    #[arg(short, long)]
    pub model: Option<String>,

    /// Wire protocol spoken to the server
    #[arg(long, value_enum)]
    pub provider: Option<LlmProvider>,

    /// Model server base URL
    #[arg(long)]
    pub host: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log request and response sizes
    #[arg(long)]
    pub llmdbg: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "logpilot",
            "run",
            "--dataset",
            "data/validation/actual_validation.csv",
            "--output",
            "predictions_actual.json",
            "--model",
            "deepseek-r1:70b",
            "--provider",
            "openai",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                dataset,
                output,
                delimiter,
                llm,
                ..
            } => {
                assert_eq!(dataset, Some(PathBuf::from("data/validation/actual_validation.csv")));
                assert_eq!(output, Some(PathBuf::from("predictions_actual.json")));
                assert_eq!(delimiter, '|');
                assert_eq!(llm.model.as_deref(), Some("deepseek-r1:70b"));
                assert_eq!(llm.provider, Some(LlmProvider::Openai));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_run_dataset_requires_output() {
        let result = Cli::try_parse_from(["logpilot", "run", "--dataset", "a.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_plan_conflicts_with_dataset() {
        let result = Cli::try_parse_from([
            "logpilot", "run", "--plan", "p.yaml", "--dataset", "a.csv", "--output", "a.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["logpilot", "info", "--verbose", "--log-format", "json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(!cli.no_color);
    }

    #[test]
    fn test_no_color_after_subcommand() {
        let cli = Cli::try_parse_from(["logpilot", "predict", "[error] boom", "--no-color"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Predict { json: false, .. }));
    }
}
