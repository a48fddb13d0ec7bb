use crate::benchmark::RunOutcome;
use crate::prediction::{ErrorType, Prediction, Severity};
use colored::{ColoredString, Colorize};

const SEPARATOR_WIDTH: usize = 60;

/// Console output for single predictions and run summaries
pub struct TerminalReporter {
    use_colors: bool,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn print_prediction(&self, prediction: &Prediction) {
        println!("\n{}", self.paint("🔎 Prediction", Tone::Heading));
        println!("{}", self.paint(&"─".repeat(SEPARATOR_WIDTH), Tone::Muted));
        println!("  Input:        {}", prediction.input());
        println!(
            "  Error type:   {}",
            self.paint(
                prediction.error_type().map_or("unset", |t| t.as_str()),
                error_type_color(prediction.error_type())
            )
        );
        println!(
            "  Severity:     {}",
            self.paint(
                prediction.severity().map_or("unset", |s| s.as_str()),
                severity_color(prediction.severity())
            )
        );
        println!("  Description:  {}", prediction.description().unwrap_or(""));
        println!("  Solution:     {}", prediction.solution().unwrap_or(""));
        println!();
    }

    pub fn print_summary(&self, model: &str, outcomes: &[RunOutcome]) {
        let rule = "═".repeat(SEPARATOR_WIDTH);
        println!("\n{}", self.paint(&rule, Tone::Rule));
        println!("{}", self.paint(&format!("LOGPILOT RUN SUMMARY ({})", model), Tone::Heading));
        println!("{}", self.paint(&rule, Tone::Rule));

        for outcome in outcomes {
            println!(
                "\n  📄 {}",
                self.paint(&outcome.dataset.display().to_string(), Tone::Path)
            );
            println!("     Rows:          {}", outcome.rows);
            println!("     Skipped rows:  {}", outcome.skipped);
            println!("     Predictions:   {}", outcome.written);

            let fallbacks = outcome.fallbacks.to_string();
            if outcome.fallbacks > 0 {
                println!("     Fallbacks:     {}", self.paint(&fallbacks, Tone::Warn));
            } else {
                println!("     Fallbacks:     {}", self.paint(&fallbacks, Tone::Good));
            }

            println!("     Elapsed:       {:.1}s", outcome.elapsed.as_secs_f64());
            println!("     Output:        {}", outcome.output.display());
        }

        println!();
    }

    fn paint(&self, text: &str, tone: Tone) -> ColoredString {
        if !self.use_colors {
            return text.normal();
        }
        match tone {
            Tone::Good => text.bright_green(),
            Tone::Warn => text.bright_yellow(),
            Tone::Bad => text.bright_red().bold(),
            Tone::Neutral => text.normal(),
            Tone::Heading => text.bright_white().bold(),
            Tone::Rule => text.bright_blue(),
            Tone::Muted => text.bright_black(),
            Tone::Path => text.bright_cyan(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Good,
    Warn,
    Bad,
    Neutral,
    Heading,
    Rule,
    Muted,
    Path,
}

fn error_type_color(error_type: Option<ErrorType>) -> Tone {
    match error_type {
        Some(ErrorType::NoError) => Tone::Good,
        Some(ErrorType::Warning) => Tone::Warn,
        Some(ErrorType::Runtime) | Some(ErrorType::Fatal) => Tone::Bad,
        None => Tone::Neutral,
    }
}

fn severity_color(severity: Option<Severity>) -> Tone {
    match severity {
        Some(Severity::Notice) => Tone::Good,
        Some(Severity::Warn) => Tone::Warn,
        Some(Severity::Error) => Tone::Bad,
        None => Tone::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tones() {
        assert_eq!(error_type_color(Some(ErrorType::Fatal)), Tone::Bad);
        assert_eq!(error_type_color(None), Tone::Neutral);
        assert_eq!(severity_color(Some(Severity::Warn)), Tone::Warn);
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let reporter = TerminalReporter::new().with_colors(false);
        for tone in [Tone::Bad, Tone::Heading, Tone::Rule, Tone::Muted, Tone::Path] {
            let painted = reporter.paint("fatal", tone).to_string();
            assert_eq!(painted, "fatal");
        }
    }

    #[test]
    fn test_colored_output_is_styled() {
        colored::control::set_override(true);
        let reporter = TerminalReporter::new();
        let painted = reporter.paint("LOGPILOT RUN SUMMARY", Tone::Heading).to_string();
        colored::control::unset_override();
        assert!(painted.contains('\u{1b}'));
    }
}
