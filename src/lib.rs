//! Classifies production log lines with a local reasoning model and writes
//! the predictions as JSON lines for offline scoring.

pub mod benchmark;
pub mod cli;
pub mod dataset;
pub mod llm;
pub mod model;
pub mod prediction;
pub mod report;

pub use model::{Model, OllamaModel};
pub use prediction::{ErrorType, Prediction, Severity};
