//! Skill matcher: match free-text skills against a curated canonical list

mod cli;
mod config;
mod error;
mod matching;
mod output;
mod recorder;
mod store;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, SkillsAction};
use config::Config;
use error::{Result, SkillMatcherError};
use log::{debug, error, info, warn};
use matching::embedding::{Embedder, Model2VecEmbedder, TrigramEmbedder};
use matching::matcher::SkillMatcher;
use recorder::QueryRecorder;
use std::process;
use std::sync::Arc;
use store::CandidateStore;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            skill,
            profile,
            output,
            skills_file,
            no_log,
        } => {
            let profile = match profile {
                Some(name) => cli::parse_profile(&name).map_err(SkillMatcherError::InvalidInput)?,
                None => config.scoring.profile,
            };

            let output_format =
                cli::parse_output_format(&output).map_err(SkillMatcherError::InvalidInput)?;

            let names = match &skills_file {
                Some(path) => {
                    cli::load_skills_file(path).map_err(SkillMatcherError::InvalidInput)?
                }
                None => config.skills.canonical.clone(),
            };

            info!(
                "Matching '{}' against {} canonical skills ({:?} profile)",
                skill,
                names.len(),
                profile
            );

            let embedder = build_embedder(&config).await;
            let store = CandidateStore::load(&names, embedder.as_ref())?;
            let mut matcher = SkillMatcher::new(store, embedder, profile);

            let recorder = if no_log {
                None
            } else {
                Some(Arc::new(QueryRecorder::new()))
            };
            if let Some(recorder) = &recorder {
                matcher = matcher.with_recorder(Arc::clone(recorder));
            }

            let report = matcher.match_skill(&skill);

            let formatter =
                output::formatter::formatter_for(output_format, config.output.color_output);
            let rendered = formatter.format_report(&report)?;
            println!("{}", rendered.trim_end());

            if let Some(recorder) = &recorder {
                debug!(
                    "Recorded {} query and {} match log entries",
                    recorder.queries().len(),
                    recorder.matches().len()
                );
            }
        }

        Commands::Skills { action } => match action {
            SkillsAction::List { skills_file } => {
                let names = match &skills_file {
                    Some(path) => {
                        cli::load_skills_file(path).map_err(SkillMatcherError::InvalidInput)?
                    }
                    None => config.skills.canonical.clone(),
                };

                println!("Canonical skills ({}):", names.len());
                for name in &names {
                    println!("  • {}", name);
                }
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Models Directory: {}", config.model.models_dir.display());
                println!("Embedding Model: {}", config.model.embedding_model);
                println!("Scoring Profile: {:?}", config.scoring.profile);
                println!("\nCanonical Skills:");
                for name in &config.skills.canonical {
                    println!("  • {}", name);
                }
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

/// Load the configured Model2Vec embedding model, falling back to hashed
/// character trigrams when no model is installed so matching still works in
/// a degraded form.
async fn build_embedder(config: &Config) -> Arc<dyn Embedder> {
    let model_path = config.model_path();
    match Model2VecEmbedder::load(&model_path).await {
        Ok(embedder) => Arc::new(embedder),
        Err(e) => {
            warn!(
                "Could not load embedding model ({}); falling back to character trigram embeddings",
                e
            );
            Arc::new(TrigramEmbedder::default())
        }
    }
}
