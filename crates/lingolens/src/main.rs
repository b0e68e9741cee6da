//! LingoLens CLI - image-driven language-learning content generation.
//!
//! LingoLens analyzes an image, generates CEFR-leveled comprehension
//! questions about it, and grades free-text student answers. It is built
//! to be invoked as a subprocess by a host server: complex payloads
//! arrive as JSON-encoded arguments, exactly one JSON document goes to
//! stdout, and a non-zero exit status pairs with a JSON error body.
//!
//! # Usage
//!
//! ```bash
//! # Generate questions for an image
//! lingolens generate --file photo.jpg --language Spanish --level A2
//!
//! # Grade student answers
//! lingolens evaluate --data '{"image_description": "...", ...}'
//!
//! # Image analysis only
//! lingolens analyze --file photo.jpg --format json
//!
//! # View configuration
//! lingolens config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// LingoLens - turn an image into language-learning questions and grade the answers.
#[derive(Parser, Debug)]
#[command(name = "lingolens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze an image and generate learner questions for it
    Generate(cli::generate::GenerateArgs),

    /// Grade student answers against expected answers
    Evaluate(cli::evaluate::EvaluateArgs),

    /// Analyze an image without generating questions
    Analyze(cli::analyze::AnalyzeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match lingolens_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `lingolens config path`."
            );
            lingolens_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("LingoLens v{}", lingolens_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Generate(args) => cli::generate::execute(args, config).await,
        Commands::Evaluate(args) => cli::evaluate::execute(args, config).await,
        Commands::Analyze(args) => cli::analyze::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
