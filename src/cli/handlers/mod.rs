pub mod config;
pub mod predict;
pub mod run;

// Re-export handler functions for convenience
pub use config::handle_config_command;
pub use predict::{handle_predict_command, handle_prompt_command};
pub use run::{handle_run_command, RunOptions};
