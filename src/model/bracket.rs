//! Postseason bracket structure: how many home and away games a team plays in
//! each round, and which elimination points are reported as scenarios.
//!
//! Every supported topology is data over the same [`RoundSpec`] sequence:
//!
//! - **flat**: a playoff tier and a World Series tier, worst/best only, every
//!   game booked on the away side. Each scenario books its own games per tier.
//! - **cumulative**: four rounds whose game counts do not depend on the outcome.
//! - **round-by-round**: four rounds with distinct win/lose home-away counts.
//!
//! Game counts are signed on purpose. A negative count is a bracket-definition
//! bug and is rejected when revenue is calculated, not when the bracket loads.
//! Scenario order is checked at load: earliest exit first, the title last.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::config::Parameters;
use crate::error::{Result, RevenueError};

pub const KEY_GAMES_PLAYOFF_WORST: &str = "games.playoff.worst";
pub const KEY_GAMES_PLAYOFF_BEST: &str = "games.playoff.best";
pub const KEY_GAMES_WORLD_SERIES_WORST: &str = "games.worldseries.worst";
pub const KEY_GAMES_WORLD_SERIES_BEST: &str = "games.worldseries.best";

/// One elimination series of the bracket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoundSpec {
    pub label: String,
    /// Priced and attended at the World Series tier instead of the playoff tier
    #[serde(default)]
    pub is_world_series: bool,
    pub home_games_if_advance: i32,
    pub away_games_if_advance: i32,
    pub home_games_if_eliminated: i32,
    pub away_games_if_eliminated: i32,
}

impl RoundSpec {
    pub fn new(
        label: impl Into<String>,
        is_world_series: bool,
        advance: (i32, i32),
        eliminated: (i32, i32),
    ) -> Self {
        RoundSpec {
            label: label.into(),
            is_world_series,
            home_games_if_advance: advance.0,
            away_games_if_advance: advance.1,
            home_games_if_eliminated: eliminated.0,
            away_games_if_eliminated: eliminated.1,
        }
    }

    /// A round where the team plays the same games whatever the outcome.
    pub fn fixed(label: impl Into<String>, is_world_series: bool, home: i32, away: i32) -> Self {
        Self::new(label, is_world_series, (home, away), (home, away))
    }

    /// `(home, away)` games played in this round for the given outcome.
    pub fn games(&self, outcome: Outcome) -> (i32, i32) {
        match outcome {
            Outcome::Advance => (self.home_games_if_advance, self.away_games_if_advance),
            Outcome::Eliminated => (self.home_games_if_eliminated, self.away_games_if_eliminated),
        }
    }

    /// Fail on any negative game count.
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("home_games_if_advance", self.home_games_if_advance),
            ("away_games_if_advance", self.away_games_if_advance),
            ("home_games_if_eliminated", self.home_games_if_eliminated),
            ("away_games_if_eliminated", self.away_games_if_eliminated),
        ];
        for (field, games) in counts {
            if games < 0 {
                return Err(RevenueError::scenario(
                    &self.label,
                    format!("{} must not be negative, got {}", field, games),
                ));
            }
        }
        Ok(())
    }
}

/// Result of a single round for the modeled team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Advance,
    Eliminated,
}

/// Where a scenario's postseason run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// Knocked out in the round with this zero-based index
    EliminatedIn(usize),
    /// Won every round including the final
    Champion,
    /// Fixed `(home, away)` games for every round, whatever the outcome
    Booked(Vec<(i32, i32)>),
}

impl Exit {
    /// Outcome of `round` on the way to this exit, or `None` once the run is over.
    pub fn outcome_in(&self, round: usize) -> Option<Outcome> {
        match *self {
            Exit::Champion => Some(Outcome::Advance),
            Exit::EliminatedIn(k) if round < k => Some(Outcome::Advance),
            Exit::EliminatedIn(k) if round == k => Some(Outcome::Eliminated),
            Exit::EliminatedIn(_) | Exit::Booked(_) => None,
        }
    }

    /// `(home, away)` games booked in `round` at position `index`, or `None`
    /// once the run is over.
    pub fn games_in(&self, index: usize, round: &RoundSpec) -> Option<(i32, i32)> {
        match self {
            Exit::Booked(games) => games.get(index).copied(),
            _ => self.outcome_in(index).map(|outcome| round.games(outcome)),
        }
    }

    /// Place in progress order; booked scenarios have none.
    fn progress(&self, rounds: usize) -> Option<usize> {
        match *self {
            Exit::EliminatedIn(k) => Some(k),
            Exit::Champion => Some(rounds),
            Exit::Booked(_) => None,
        }
    }
}

/// A named hypothetical postseason outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSpec {
    pub label: String,
    pub exit: Exit,
}

impl ScenarioSpec {
    pub fn eliminated_in(label: impl Into<String>, round: usize) -> Self {
        ScenarioSpec {
            label: label.into(),
            exit: Exit::EliminatedIn(round),
        }
    }

    pub fn champion(label: impl Into<String>) -> Self {
        ScenarioSpec {
            label: label.into(),
            exit: Exit::Champion,
        }
    }

    pub fn booked(label: impl Into<String>, games: Vec<(i32, i32)>) -> Self {
        ScenarioSpec {
            label: label.into(),
            exit: Exit::Booked(games),
        }
    }
}

/// Games played per tier in one flat-model scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatGames {
    pub playoff: i32,
    pub world_series: i32,
}

/// Games a scenario books, indexed `[tier][side]` (tier 1 is the World
/// Series, side 0 is home), and the last round it plays.
struct Tally {
    games: [[i64; 2]; 2],
    last_round: usize,
}

/// Ordered rounds plus the scenarios to report, earliest exit first.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketModel {
    name: String,
    rounds: Vec<RoundSpec>,
    scenarios: Vec<ScenarioSpec>,
}

impl BracketModel {
    pub fn new(name: impl Into<String>, rounds: Vec<RoundSpec>, scenarios: Vec<ScenarioSpec>) -> Self {
        BracketModel {
            name: name.into(),
            rounds,
            scenarios,
        }
    }

    /// Bracket reporting every elimination point in order, then the title.
    pub fn from_rounds(name: impl Into<String>, rounds: Vec<RoundSpec>) -> Self {
        let mut scenarios: Vec<ScenarioSpec> = rounds
            .iter()
            .enumerate()
            .map(|(i, r)| ScenarioSpec::eliminated_in(format!("Eliminated in {}", r.label), i))
            .collect();
        if let Some(last) = rounds.last() {
            scenarios.push(ScenarioSpec::champion(format!("Wins {}", last.label)));
        }
        Self::new(name, rounds, scenarios)
    }

    /// Two-scenario worst/best model with no home/away distinction: every game
    /// is booked on the away side, so only the away share applies.
    pub fn flat(worst: FlatGames, best: FlatGames) -> Result<Self> {
        let rounds = vec![
            RoundSpec::new("Playoffs", false, (0, best.playoff), (0, worst.playoff)),
            RoundSpec::new(
                "World Series",
                true,
                (0, best.world_series),
                (0, worst.world_series),
            ),
        ];
        let scenarios = vec![
            ScenarioSpec::booked(
                "Eliminated in Wild Card Series",
                vec![(0, worst.playoff), (0, worst.world_series)],
            ),
            ScenarioSpec::booked(
                "Reaches World Series Game 7",
                vec![(0, best.playoff), (0, best.world_series)],
            ),
        ];
        let bracket = Self::new("flat", rounds, scenarios);
        bracket.validate()?;
        Ok(bracket)
    }

    /// Flat model with game counts taken from the parameter store.
    pub fn flat_from_parameters(params: &Parameters) -> Result<Self> {
        let worst = FlatGames {
            playoff: params.get_i32(KEY_GAMES_PLAYOFF_WORST, 2)?,
            world_series: params.get_i32(KEY_GAMES_WORLD_SERIES_WORST, 0)?,
        };
        let best = FlatGames {
            playoff: params.get_i32(KEY_GAMES_PLAYOFF_BEST, 12)?,
            world_series: params.get_i32(KEY_GAMES_WORLD_SERIES_BEST, 4)?,
        };
        Self::flat(worst, best)
    }

    /// Four rounds whose home/away counts are the same whether the team
    /// advances or goes out; a World Series loss and win differ only in label.
    pub fn cumulative() -> Self {
        let rounds = vec![
            RoundSpec::fixed("Wild Card Series", false, 3, 0),
            RoundSpec::fixed("Division Series", false, 3, 2),
            RoundSpec::fixed("League Championship Series", false, 4, 3),
            RoundSpec::fixed("World Series", true, 4, 3),
        ];
        Self::from_rounds("cumulative", rounds)
    }

    /// Four rounds with separate win-and-advance and lose-and-go-home counts.
    pub fn round_by_round() -> Self {
        let rounds = vec![
            RoundSpec::new("Wild Card Series", false, (2, 1), (1, 1)),
            RoundSpec::new("Division Series", false, (3, 2), (2, 1)),
            RoundSpec::new("League Championship Series", false, (4, 3), (3, 2)),
            RoundSpec::new("World Series", true, (4, 3), (3, 2)),
        ];
        Self::from_rounds("round-by-round", rounds)
    }

    /// Load a bracket from a TOML file with `[[rounds]]` and optional
    /// `[[scenarios]]` tables.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading bracket file {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        Self::from_toml_str(&name, &content)
            .with_context(|| format!("parsing bracket file {}", path.display()))
    }

    pub fn from_toml_str(name: &str, content: &str) -> anyhow::Result<Self> {
        let file: BracketFile = toml::from_str(content)?;
        Ok(file.into_model(name)?)
    }

    /// Check the whole bracket before any figure is produced.
    ///
    /// Structural problems are configuration errors. Negative game counts, and
    /// counts that would let revenue fall from one scenario to the next, are
    /// reported against the round concerned.
    pub fn validate(&self) -> Result<()> {
        self.check_structure()?;
        for round in &self.rounds {
            round.validate()?;
        }
        for scenario in &self.scenarios {
            let Exit::Booked(games) = &scenario.exit else {
                continue;
            };
            for (round, &(home, away)) in self.rounds.iter().zip(games) {
                if home < 0 || away < 0 {
                    return Err(RevenueError::scenario(
                        &round.label,
                        format!(
                            "scenario {:?} books negative games ({}, {})",
                            scenario.label, home, away
                        ),
                    ));
                }
            }
        }
        self.check_monotonic()
    }

    /// Rounds exist, every exit points inside the bracket and scenarios run
    /// from the earliest exit to the title.
    fn check_structure(&self) -> Result<()> {
        if self.rounds.is_empty() {
            return Err(RevenueError::config(format!(
                "bracket {:?} has no rounds",
                self.name
            )));
        }
        let mut previous: Option<(usize, &str)> = None;
        for scenario in &self.scenarios {
            match &scenario.exit {
                Exit::EliminatedIn(k) if *k >= self.rounds.len() => {
                    return Err(RevenueError::config(format!(
                        "scenario {:?} exits in round {} but bracket {:?} has only {} rounds",
                        scenario.label,
                        k + 1,
                        self.name,
                        self.rounds.len()
                    )));
                }
                Exit::Booked(games) if games.len() != self.rounds.len() => {
                    return Err(RevenueError::config(format!(
                        "scenario {:?} books {} rounds but bracket {:?} has {}",
                        scenario.label,
                        games.len(),
                        self.name,
                        self.rounds.len()
                    )));
                }
                _ => {}
            }
            let Some(progress) = scenario.exit.progress(self.rounds.len()) else {
                continue;
            };
            if let Some((before, label)) = previous {
                if progress < before {
                    return Err(RevenueError::config(format!(
                        "scenario {:?} ends earlier than {:?}, which is listed before it; \
                         list scenarios from the earliest exit to the title",
                        scenario.label, label
                    )));
                }
            }
            previous = Some((progress, scenario.label.as_str()));
        }
        Ok(())
    }

    /// Per side and pricing tier, booked games must not drop from one
    /// scenario to the next.
    fn check_monotonic(&self) -> Result<()> {
        let tallies: Vec<Tally> = self.scenarios.iter().map(|s| self.tally(&s.exit)).collect();
        for (i, pair) in tallies.windows(2).enumerate() {
            for (tier, tier_name) in [(0, "playoff"), (1, "World Series")] {
                for (side, side_name) in [(0, "home"), (1, "away")] {
                    let before = pair[0].games[tier][side];
                    let after = pair[1].games[tier][side];
                    if after < before {
                        return Err(RevenueError::scenario(
                            &self.rounds[pair[0].last_round].label,
                            format!(
                                "{} {}-tier games drop from {} in {:?} to {} in {:?}",
                                side_name,
                                tier_name,
                                before,
                                self.scenarios[i].label,
                                after,
                                self.scenarios[i + 1].label
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn tally(&self, exit: &Exit) -> Tally {
        let mut games = [[0i64; 2]; 2];
        let mut last_round = 0;
        for (index, round) in self.rounds.iter().enumerate() {
            let Some((home, away)) = exit.games_in(index, round) else {
                break;
            };
            let tier = usize::from(round.is_world_series);
            games[tier][0] += i64::from(home);
            games[tier][1] += i64::from(away);
            last_round = index;
        }
        Tally { games, last_round }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rounds(&self) -> &[RoundSpec] {
        &self.rounds
    }

    pub fn scenarios(&self) -> &[ScenarioSpec] {
        &self.scenarios
    }
}

#[derive(Debug, Deserialize)]
struct BracketFile {
    rounds: Vec<RoundSpec>,
    #[serde(default)]
    scenarios: Vec<ScenarioEntry>,
}

#[derive(Debug, Deserialize)]
struct ScenarioEntry {
    label: String,
    eliminated_in: Option<usize>,
    #[serde(default)]
    champion: bool,
}

impl BracketFile {
    fn into_model(self, name: &str) -> Result<BracketModel> {
        if self.scenarios.is_empty() {
            let bracket = BracketModel::from_rounds(name, self.rounds);
            bracket.check_structure()?;
            return Ok(bracket);
        }
        let scenarios = self
            .scenarios
            .into_iter()
            .map(|entry| match (entry.eliminated_in, entry.champion) {
                (Some(round), false) => Ok(ScenarioSpec::eliminated_in(entry.label, round)),
                (None, true) => Ok(ScenarioSpec::champion(entry.label)),
                _ => Err(RevenueError::config(format!(
                    "scenario {:?} needs exactly one of eliminated_in or champion = true",
                    entry.label
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        let bracket = BracketModel::new(name, self.rounds, scenarios);
        bracket.check_structure()?;
        Ok(bracket)
    }
}
