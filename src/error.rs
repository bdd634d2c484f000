//! Error kinds raised by the revenue model.

use thiserror::Error;

/// Errors that can occur while building or evaluating the revenue model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevenueError {
    /// Malformed or inconsistent economic/bracket parameters. Fatal to the run.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A team record that cannot describe a real franchise.
    #[error("Invalid team data for {team:?}: {reason}")]
    InvalidTeamData { team: String, reason: String },

    /// A bracket definition the calculator cannot evaluate, such as a negative
    /// game count. Fatal to one team's calculation only.
    #[error("Invalid scenario input in round {round:?}: {reason}")]
    InvalidScenarioInput { round: String, reason: String },
}

impl RevenueError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn team(team: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTeamData {
            team: team.into(),
            reason: reason.into(),
        }
    }

    pub fn scenario(round: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidScenarioInput {
            round: round.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RevenueError>;
