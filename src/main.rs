use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

mod config;
mod error;
mod model;
mod report;
mod roster;

use config::{BracketKind, Config, OutputFormat};
use model::{BracketModel, EconomicModel};

fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // Configuration errors abort before any team is evaluated
    let params = config.parameters()?;
    if let Some(path) = &config.config {
        info!("Loaded {} parameter(s) from {}", params.len(), path.display());
    }
    for key in params.unknown_keys() {
        warn!("Ignoring unknown parameter {}", key);
    }

    let economics = EconomicModel::from_parameters(&params)?;
    info!(
        "Ticket prices: playoff ${:.2}, World Series ${:.2}; gate share home {:.2} / away {:.2}",
        economics.ticket_price_playoff(),
        economics.ticket_price_world_series(),
        economics.home_share(),
        economics.away_share()
    );

    let bracket = match &config.bracket_file {
        Some(path) => BracketModel::load(path)?,
        None => match config.bracket {
            BracketKind::Flat => BracketModel::flat_from_parameters(&params)?,
            BracketKind::Cumulative => BracketModel::cumulative(),
            BracketKind::RoundByRound => BracketModel::round_by_round(),
        },
    };
    info!(
        "Using the {} bracket ({} rounds, {} scenarios)",
        bracket.name(),
        bracket.rounds().len(),
        bracket.scenarios().len()
    );

    let records = if config.sample_roster {
        info!("Using the built-in sample roster");
        roster::sample_roster()
    } else {
        roster::load_records(&config.teams_path(&params))?
    };

    // Strict mode: a corrupt roster aborts the run before anything is printed
    if !config.lenient {
        roster::validate_all(&records)?;
    }

    let outcome = report::run_batch(records, &economics, &bracket);

    match config.format {
        OutputFormat::Text => print!("{}", report::render_text(&outcome.reports)),
        OutputFormat::Json => println!("{}", report::render_json(&outcome.reports)?),
    }

    if outcome.all_failed() {
        anyhow::bail!("no team could be evaluated ({} failure(s))", outcome.failures.len());
    }

    Ok(())
}
