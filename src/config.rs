use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, RevenueError};
use crate::model::bracket::{
    KEY_GAMES_PLAYOFF_BEST, KEY_GAMES_PLAYOFF_WORST, KEY_GAMES_WORLD_SERIES_BEST,
    KEY_GAMES_WORLD_SERIES_WORST,
};
use crate::model::economics::{
    KEY_SHARE_AWAY, KEY_SHARE_HOME, KEY_TICKET_PRICE_PLAYOFF, KEY_TICKET_PRICE_WORLD_SERIES,
};
use crate::roster::{DEFAULT_TEAMS_PATH, KEY_TEAMS_PATH};

/// Every key the parameter store understands.
pub const KNOWN_KEYS: [&str; 9] = [
    KEY_TICKET_PRICE_PLAYOFF,
    KEY_TICKET_PRICE_WORLD_SERIES,
    KEY_SHARE_HOME,
    KEY_SHARE_AWAY,
    KEY_GAMES_PLAYOFF_WORST,
    KEY_GAMES_PLAYOFF_BEST,
    KEY_GAMES_WORLD_SERIES_WORST,
    KEY_GAMES_WORLD_SERIES_BEST,
    KEY_TEAMS_PATH,
];

/// Postseason gate revenue estimator
#[derive(Parser, Debug, Clone)]
#[command(name = "postseason-revenue", version, about)]
pub struct Config {
    /// Parameter file (TOML). Built-in defaults are used when omitted
    #[arg(long, env = "REVENUE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Team data file (JSON array); overrides `teams.json.path`
    #[arg(long, env = "REVENUE_TEAMS")]
    pub teams: Option<PathBuf>,

    /// Use the built-in 11-team sample roster instead of a data file
    #[arg(long, env = "REVENUE_SAMPLE_ROSTER", default_value = "false")]
    pub sample_roster: bool,

    /// Bracket topology
    #[arg(long, env = "REVENUE_BRACKET", value_enum, default_value = "round-by-round")]
    pub bracket: BracketKind,

    /// Bracket definition file (TOML); takes precedence over --bracket
    #[arg(long, env = "REVENUE_BRACKET_FILE")]
    pub bracket_file: Option<PathBuf>,

    /// Report format
    #[arg(long, env = "REVENUE_FORMAT", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Skip invalid team records instead of aborting the run
    #[arg(long, env = "REVENUE_LENIENT", default_value = "false")]
    pub lenient: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BracketKind {
    /// Worst/best only, away share applied to every game
    Flat,
    /// Four rounds, same games whether the team advances or not
    Cumulative,
    /// Four rounds with separate win and loss game counts
    RoundByRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sample_roster && self.teams.is_some() {
            anyhow::bail!("--sample-roster and --teams are mutually exclusive");
        }
        for (flag, path) in [
            ("--config", &self.config),
            ("--teams", &self.teams),
            ("--bracket-file", &self.bracket_file),
        ] {
            if matches!(path, Some(p) if p.as_os_str().is_empty()) {
                anyhow::bail!("{} must not be an empty path", flag);
            }
        }
        Ok(())
    }

    /// Load the parameter store, or an empty one when no file was given.
    pub fn parameters(&self) -> anyhow::Result<Parameters> {
        match &self.config {
            Some(path) => Parameters::load(path),
            None => Ok(Parameters::default()),
        }
    }

    /// Team file location: `--teams`, then `teams.json.path`, then the default.
    pub fn teams_path(&self, params: &Parameters) -> PathBuf {
        match &self.teams {
            Some(path) => path.clone(),
            None => PathBuf::from(params.get(KEY_TEAMS_PATH).unwrap_or(DEFAULT_TEAMS_PATH)),
        }
    }
}

/// Flat `key → value` store of economic and bracket parameters.
///
/// Values are kept as text and parsed on access so a malformed entry is
/// reported against its key. Nested TOML tables flatten to dotted keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: BTreeMap<String, String>,
}

impl Parameters {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading parameter file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing parameter file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| RevenueError::config(e.to_string()))?;
        let mut values = BTreeMap::new();
        flatten("", &table, &mut values)?;
        Ok(Parameters { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_f64(&self, key: &str, default: f64) -> Result<f64> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| {
                RevenueError::config(format!("invalid numeric value for {}: {:?}", key, raw))
            }),
        }
    }

    pub fn get_i32(&self, key: &str, default: i32) -> Result<i32> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| {
                RevenueError::config(format!("invalid integer value for {}: {:?}", key, raw))
            }),
        }
    }

    /// Keys present in the store that nothing reads.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| !KNOWN_KEYS.contains(k))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl FromIterator<(String, String)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Parameters {
            values: iter.into_iter().collect(),
        }
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) -> Result<()> {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        let text = match value {
            toml::Value::Table(inner) => {
                flatten(&key, inner, out)?;
                continue;
            }
            toml::Value::String(s) => s.clone(),
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Boolean(b) => b.to_string(),
            toml::Value::Datetime(d) => d.to_string(),
            toml::Value::Array(_) => {
                return Err(RevenueError::config(format!(
                    "{} must be a single value, not an array",
                    key
                )))
            }
        };
        out.insert(key, text);
    }
    Ok(())
}
