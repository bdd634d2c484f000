//! Gate revenue per round and per scenario.
//!
//! One arithmetic kernel drives everything:
//!
//!   revenue(side) = capacity × fill_rate(round) × ticket_price(round) × share(side) × games(side)
//!
//! where the fill rate and ticket price follow the round's pricing tier and the
//! share is the home or away fraction of the gate. A scenario that ends in
//! round k books the "advance" games of rounds before k, the "eliminated"
//! games of round k, and nothing after; a title run books "advance" games of
//! every round, and a booked scenario brings its own games per round. Home and
//! away sides are summed independently.

use serde::Serialize;

use super::bracket::{BracketModel, RoundSpec};
use super::economics::{EconomicModel, Side};
use super::team::Team;
use crate::error::{Result, RevenueError};

/// Cumulative gate revenue for one named scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub label: String,
    pub home_revenue: f64,
    pub away_revenue: f64,
}

impl ScenarioResult {
    pub fn total(&self) -> f64 {
        self.home_revenue + self.away_revenue
    }
}

/// Revenue from `games` games at one pricing tier for one side of the gate.
///
/// `round` only labels the error for a negative game count.
pub fn gate_revenue(
    round: &str,
    capacity: u32,
    fill_rate: f64,
    ticket_price: f64,
    share: f64,
    games: i32,
) -> Result<f64> {
    if games < 0 {
        return Err(RevenueError::scenario(
            round,
            format!("game count must not be negative, got {}", games),
        ));
    }
    Ok(f64::from(capacity) * fill_rate * ticket_price * share * f64::from(games))
}

/// `(home, away)` revenue a team earns from `games` `(home, away)` played in one round.
pub fn round_revenue(
    team: &Team,
    economics: &EconomicModel,
    round: &RoundSpec,
    games: (i32, i32),
) -> Result<(f64, f64)> {
    let gate = |side: Side, games: i32| {
        gate_revenue(
            &round.label,
            team.capacity(),
            team.fill_rate(round.is_world_series),
            economics.ticket_price(round.is_world_series),
            economics.share(side),
            games,
        )
    };
    Ok((gate(Side::Home, games.0)?, gate(Side::Away, games.1)?))
}

/// Evaluate every scenario of the bracket for one team, earliest exit first.
///
/// The whole bracket is validated before any figure is produced, so a bad
/// round anywhere fails the call without partial output.
pub fn compute_scenarios(
    team: &Team,
    economics: &EconomicModel,
    bracket: &BracketModel,
) -> Result<Vec<ScenarioResult>> {
    bracket.validate()?;

    let mut results = Vec::with_capacity(bracket.scenarios().len());
    for scenario in bracket.scenarios() {
        let mut home_revenue = 0.0;
        let mut away_revenue = 0.0;

        for (index, round) in bracket.rounds().iter().enumerate() {
            let Some(games) = scenario.exit.games_in(index, round) else {
                break;
            };
            let (home, away) = round_revenue(team, economics, round, games)?;
            home_revenue += home;
            away_revenue += away;
        }

        results.push(ScenarioResult {
            label: scenario.label.clone(),
            home_revenue,
            away_revenue,
        });
    }

    Ok(results)
}
