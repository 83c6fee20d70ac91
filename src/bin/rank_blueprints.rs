//! Rank a draw of blueprint options from the command line
//!
//! Usage:
//!   cargo run --bin rank_blueprints -- --biome coral_forest \
//!     --species humans --species lizards --species foxes \
//!     --built butcher --candidate tavern --candidate cookhouse --candidate lizard_house

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blueprint_scorer::{
    validate_request, BlueprintRequest, BlueprintScorer, JsonFormatter, LookupPolicy,
    MarkdownFormatter, ScorerConfig,
};

/// Rank blueprint options for a settlement
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Settlement biome id (e.g., cursed_royal_woodlands)
    #[arg(long, value_name = "BIOME")]
    biome: String,

    /// Selected species id, repeat for each species
    #[arg(long = "species", value_name = "SPECIES")]
    species: Vec<String>,

    /// Building already placed, repeat for each building
    #[arg(long = "built", value_name = "BUILDING")]
    built: Vec<String>,

    /// Blueprint option to rank, repeat for each option
    #[arg(long = "candidate", value_name = "BUILDING")]
    candidates: Vec<String>,

    /// Catalog JSON to use instead of the embedded one
    #[arg(long, value_name = "PATH", env = "CATALOG_PATH")]
    catalog: Option<PathBuf>,

    /// Reject unknown ids instead of scoring them as neutral
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    format: OutputFormat,

    /// Rank any number of options without the three-species/three-option checks
    #[arg(long)]
    skip_validation: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Ranked report with medals and breakdowns
    Markdown,
    /// Pretty-printed JSON ranking
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blueprint_scorer=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Environment first, then flags
    let mut config = ScorerConfig::from_env().context("Invalid scorer configuration")?;
    if cli.strict {
        config.lookup_policy = LookupPolicy::Strict;
    }
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog.clone();
    }

    let scorer = BlueprintScorer::from_config(config)?;

    let request = BlueprintRequest {
        biome: cli.biome,
        species: cli.species.into_iter().collect(),
        current_buildings: cli.built,
        candidates: cli.candidates,
    };

    if cli.skip_validation {
        tracing::debug!("Request validation skipped");
    } else {
        validate_request(scorer.catalog(), &request).context("Invalid blueprint request")?;
    }

    let ranking = scorer
        .rank(&request.candidates, &request.context())
        .context("Failed to rank blueprints")?;

    match cli.format {
        OutputFormat::Markdown => print!("{}", MarkdownFormatter::format_ranking(&ranking)),
        OutputFormat::Json => {
            let json = JsonFormatter::format(&ranking).context("Failed to serialize ranking")?;
            println!("{}", json);
        }
    }

    Ok(())
}
