//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::matching::matcher::MatchReport;
use colored::Colorize;
use std::fmt::Write as _;

/// Trait for rendering a match report in one output format.
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
}

/// Console formatter with optional colors.
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for API integration and structured data.
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and reports.
pub struct MarkdownFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn score_cell(&self, score: f64) -> String {
        let text = format!("{:.3}", score);
        if !self.use_colors {
            return text;
        }
        if score > 0.8 {
            text.green().to_string()
        } else if score > 0.65 {
            text.yellow().to_string()
        } else {
            text.normal().to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut out = String::new();

        let header = format!("Matches for '{}'", report.submitted_skill);
        if self.use_colors {
            let _ = writeln!(out, "{}", header.bold());
        } else {
            let _ = writeln!(out, "{}", header);
        }

        if report.matches.is_empty() {
            let _ = writeln!(out, "  (no matches above the relevance threshold)");
            return Ok(out);
        }

        for (rank, result) in report.matches.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} — {} [{}]",
                rank + 1,
                result.skill,
                self.score_cell(result.score),
                result.method
            );
        }

        Ok(out)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "# Matches for `{}`", report.submitted_skill);
        let _ = writeln!(out);

        if report.matches.is_empty() {
            let _ = writeln!(out, "No matches above the relevance threshold.");
            return Ok(out);
        }

        let _ = writeln!(out, "| Rank | Skill | Score | Method |");
        let _ = writeln!(out, "|------|-------|-------|--------|");
        for (rank, result) in report.matches.iter().enumerate() {
            let _ = writeln!(
                out,
                "| {} | {} | {:.3} | {} |",
                rank + 1,
                result.skill,
                result.score,
                result.method
            );
        }

        Ok(out)
    }
}

/// Pick the formatter for a configured output format.
pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::aggregator::{MatchMethod, MatchResult};

    fn report() -> MatchReport {
        MatchReport {
            submitted_skill: "pythonn".to_string(),
            matches: vec![MatchResult {
                skill: "Python".to_string(),
                score: 0.92,
                method: MatchMethod::Combined,
            }],
        }
    }

    #[test]
    fn console_formatter_lists_ranked_matches() {
        let formatter = ConsoleFormatter::new(false);
        let text = formatter.format_report(&report()).unwrap();
        assert!(text.contains("Matches for 'pythonn'"));
        assert!(text.contains("1. Python"));
        assert!(text.contains("0.920"));
    }

    #[test]
    fn console_formatter_handles_empty_reports() {
        let formatter = ConsoleFormatter::new(false);
        let empty = MatchReport {
            submitted_skill: "@@@".to_string(),
            matches: vec![],
        };
        let text = formatter.format_report(&empty).unwrap();
        assert!(text.contains("no matches"));
    }

    #[test]
    fn json_formatter_emits_the_wire_shape() {
        let formatter = JsonFormatter::new(false);
        let json = formatter.format_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["submitted_skill"], "pythonn");
        assert_eq!(value["matches"][0]["skill"], "Python");
        assert_eq!(value["matches"][0]["method"], "Combined");
    }

    #[test]
    fn markdown_formatter_renders_a_table() {
        let text = MarkdownFormatter.format_report(&report()).unwrap();
        assert!(text.contains("| Rank | Skill | Score | Method |"));
        assert!(text.contains("| 1 | Python | 0.920 | Combined |"));
    }
}
