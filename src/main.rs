use anyhow::Result;
use clap::Parser;
use logpilot::cli::commands::{Cli, Commands};
use logpilot::cli::handlers::{
    handle_config_command, handle_predict_command, handle_prompt_command, handle_run_command,
    RunOptions,
};
use logpilot::cli::utils::{init_logging, print_info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_format)?;

    // Execute command
    match cli.command {
        Commands::Predict { log_line, json, llm } => {
            handle_predict_command(log_line, json, !cli.no_color, llm).await
        }

        Commands::Run {
            plan,
            dataset,
            output,
            delimiter,
            no_prime,
            no_progress,
            llm,
        } => {
            let options = RunOptions {
                plan,
                dataset,
                output,
                delimiter,
                no_prime,
                no_progress,
                colors: !cli.no_color,
            };
            handle_run_command(options, llm).await
        }

        Commands::Prompt { log_line, system } => handle_prompt_command(&log_line, system),

        Commands::Config => handle_config_command(),

        Commands::Info => {
            print_info();
            Ok(())
        }
    }
}
