//! Team roster loading.
//!
//! The data file is a JSON array of objects with `name`, `stadium`,
//! `capacity`, `playoffFillRate` and `worldSeriesFillRate` fields.

pub mod sample;

pub use sample::sample_roster;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::error::RevenueError;
use crate::model::{Team, TeamRecord};

pub const KEY_TEAMS_PATH: &str = "teams.json.path";
pub const DEFAULT_TEAMS_PATH: &str = "data/teams.json";

/// Read raw team records from a JSON file without validating them.
pub fn load_records(path: &Path) -> Result<Vec<TeamRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading team file {}", path.display()))?;
    let records = parse_records(&content)
        .with_context(|| format!("parsing team file {}", path.display()))?;
    info!("Loaded {} team record(s) from {}", records.len(), path.display());
    Ok(records)
}

pub fn parse_records(json: &str) -> serde_json::Result<Vec<TeamRecord>> {
    serde_json::from_str(json)
}

/// Validate every record, failing on the first one that is not a usable team.
pub fn validate_all(records: &[TeamRecord]) -> std::result::Result<Vec<Team>, RevenueError> {
    let teams = records
        .iter()
        .cloned()
        .map(Team::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!("Validated {} team(s)", teams.len());
    Ok(teams)
}
