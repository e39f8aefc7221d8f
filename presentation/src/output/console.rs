//! Console output formatter for answers

use colored::Colorize;
use serde::Serialize;
use snapquiz_application::SolvedScreenshot;
use snapquiz_domain::{NormalizedAnswer, OptionSet};

/// Formats answers for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an answer, showing the chosen option text when the choice is a label
    pub fn format_answer(answer: &NormalizedAnswer, options: &OptionSet) -> String {
        let mut output = String::new();

        let choice = match answer.chosen_option(options) {
            Some(text) => format!("{} ({})", answer.choice.bold(), text),
            None => answer.choice.bold().to_string(),
        };

        output.push_str(&format!("{} {}\n", "Answer:".cyan().bold(), choice));
        output.push_str(&format!(
            "{} {}\n",
            "Confidence:".cyan().bold(),
            Self::confidence(answer.confidence)
        ));
        if !answer.explanation.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Why:".cyan().bold(),
                answer.explanation
            ));
        }

        output
    }

    /// Format a solved screenshot: recognized text, then the answer
    pub fn format_solved(solved: &SolvedScreenshot, options: &OptionSet) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Recognized text:".dimmed()));
        output.push_str(&Self::indent(&solved.question_text, "  "));
        output.push_str("\n\n");
        output.push_str(&Self::format_answer(&solved.answer, options));

        output
    }

    /// Format as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn confidence(value: f64) -> String {
        let percent = format!("{:.0}%", value * 100.0);
        if value >= 0.75 {
            percent.green().to_string()
        } else if value >= 0.4 {
            percent.yellow().to_string()
        } else {
            percent.red().to_string()
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
