//! CLI interface for the skill matcher

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skill-matcher")]
#[command(about = "Match a free-text skill against a curated canonical skill list")]
#[command(
    long_about = "Match user-submitted skill text against administrator-defined canonical skills using semantic embeddings, fuzzy string matching, and TF-IDF keyword similarity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a skill string against the canonical list
    Match {
        /// The user-submitted skill text
        skill: String,

        /// Scoring profile: blended, split
        #[arg(short, long)]
        profile: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// File with canonical skills, one per line (overrides configuration)
        #[arg(short, long)]
        skills_file: Option<PathBuf>,

        /// Skip query/match logging
        #[arg(long)]
        no_log: bool,
    },

    /// Canonical skill list commands
    Skills {
        #[command(subcommand)]
        action: SkillsAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum SkillsAction {
    /// List the canonical skills in load order
    List {
        /// File with canonical skills, one per line (overrides configuration)
        #[arg(short, long)]
        skills_file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Parse and validate scoring profile
pub fn parse_profile(profile: &str) -> Result<crate::config::ScoringProfile, String> {
    match profile.to_lowercase().as_str() {
        "blended" => Ok(crate::config::ScoringProfile::Blended),
        "split" => Ok(crate::config::ScoringProfile::Split),
        _ => Err(format!(
            "Invalid scoring profile: {}. Supported: blended, split",
            profile
        )),
    }
}

/// Read a canonical skill list from a file, one skill per line.
/// Blank lines and `#` comments are skipped.
pub fn load_skills_file(path: &Path) -> Result<Vec<String>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read skills file {}: {}", path.display(), e))?;

    let skills: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if skills.is_empty() {
        return Err(format!("Skills file {} contains no skills", path.display()));
    }

    Ok(skills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn output_format_parsing_accepts_aliases() {
        assert!(parse_output_format("console").is_ok());
        assert!(parse_output_format("JSON").is_ok());
        assert!(parse_output_format("md").is_ok());
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn profile_parsing_covers_both_profiles() {
        assert_eq!(
            parse_profile("blended").unwrap(),
            crate::config::ScoringProfile::Blended
        );
        assert_eq!(
            parse_profile("Split").unwrap(),
            crate::config::ScoringProfile::Split
        );
        assert!(parse_profile("hybrid").is_err());
    }

    #[test]
    fn skills_file_skips_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# canonical skills").unwrap();
        writeln!(file, "Python").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Data Science  ").unwrap();

        let skills = load_skills_file(file.path()).unwrap();
        assert_eq!(skills, vec!["Python", "Data Science"]);
    }

    #[test]
    fn empty_skills_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_skills_file(file.path()).is_err());
    }
}
