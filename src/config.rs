//! Configuration management for the skill matcher

use crate::error::{Result, SkillMatcherError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub skills: SkillsConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub embedding_model: String,
}

/// The administrator-curated canonical skill list.
///
/// In the original deployment this came from a database; here it is part of
/// the configuration and fixed for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub canonical: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub profile: ScoringProfile,
}

/// Which aggregation discipline to apply to the three similarity signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringProfile {
    /// Single combined score per skill: 0.4 embedding + 0.3 fuzzy + 0.3 keyword.
    Blended,
    /// Embedding+fuzzy blend (0.6/0.4) and keyword-cosine reported as
    /// separately tagged match entries.
    Split,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skill-matcher")
            .join("models");

        Self {
            model: ModelConfig {
                models_dir,
                embedding_model: "minishlab/M2V_base_output".to_string(),
            },
            skills: SkillsConfig {
                canonical: vec![
                    "Python".to_string(),
                    "Relational Database".to_string(),
                    "Software Engineering".to_string(),
                    "Data Science".to_string(),
                    "NLP".to_string(),
                    "Natural Language Processing".to_string(),
                ],
            },
            scoring: ScoringConfig {
                profile: ScoringProfile::Blended,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                SkillMatcherError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            SkillMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-matcher")
            .join("config.toml")
    }

    /// Directory the embedding model is loaded from.
    pub fn model_path(&self) -> PathBuf {
        self.model.models_dir.join(&self.model.embedding_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canonical_list_is_non_empty() {
        let config = Config::default();
        assert!(!config.skills.canonical.is_empty());
        assert_eq!(config.scoring.profile, ScoringProfile::Blended);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.profile = ScoringProfile::Split;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scoring.profile, ScoringProfile::Split);
        assert_eq!(loaded.skills.canonical, config.skills.canonical);
    }

    #[test]
    fn load_creates_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.skills.canonical.len(), 6);
    }
}
