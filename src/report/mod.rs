//! Batch evaluation and report rendering.
//!
//! Each team is evaluated on its own: a bad record or a bracket the
//! calculator rejects is logged against that team and the batch moves on.

use serde::Serialize;
use std::fmt::Write as _;
use tracing::{error, info};

use crate::error::RevenueError;
use crate::model::{compute_scenarios, BracketModel, EconomicModel, ScenarioResult, Team, TeamRecord};

/// Scenario totals for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub team: String,
    pub stadium: String,
    pub scenarios: Vec<ScenarioResult>,
}

/// A team the batch could not evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamFailure {
    pub team: String,
    pub error: RevenueError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub reports: Vec<TeamReport>,
    pub failures: Vec<TeamFailure>,
}

impl BatchOutcome {
    /// True when there was work to do and none of it succeeded.
    pub fn all_failed(&self) -> bool {
        self.reports.is_empty() && !self.failures.is_empty()
    }
}

/// Evaluate one team. Validation and calculation errors both surface here.
pub fn evaluate(
    record: TeamRecord,
    economics: &EconomicModel,
    bracket: &BracketModel,
) -> Result<TeamReport, RevenueError> {
    let team = Team::try_from(record)?;
    let scenarios = compute_scenarios(&team, economics, bracket)?;
    Ok(TeamReport {
        team: team.name().to_string(),
        stadium: team.stadium().to_string(),
        scenarios,
    })
}

/// Evaluate every record in order, isolating per-team failures.
pub fn run_batch<I>(records: I, economics: &EconomicModel, bracket: &BracketModel) -> BatchOutcome
where
    I: IntoIterator<Item = TeamRecord>,
{
    let mut outcome = BatchOutcome::default();
    for record in records {
        let name = record.name.clone();
        match evaluate(record, economics, bracket) {
            Ok(report) => outcome.reports.push(report),
            Err(e) => {
                error!("Skipping team {:?}: {}", name, e);
                outcome.failures.push(TeamFailure { team: name, error: e });
            }
        }
    }
    info!(
        "Evaluated {} team(s) with the {} bracket, {} failed",
        outcome.reports.len() + outcome.failures.len(),
        bracket.name(),
        outcome.failures.len()
    );
    outcome
}

/// Human-readable report: one header per team, one line per scenario.
pub fn render_text(reports: &[TeamReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "Team: {} ({})", report.team, report.stadium);
        for s in &report.scenarios {
            let _ = writeln!(
                out,
                "  {}: {} (home {}, away {})",
                s.label,
                format_currency(s.total()),
                format_currency(s.home_revenue),
                format_currency(s.away_revenue)
            );
        }
        out.push('\n');
    }
    out
}

#[derive(Serialize)]
struct ScenarioRow<'a> {
    label: &'a str,
    home_revenue: f64,
    away_revenue: f64,
    total: f64,
}

#[derive(Serialize)]
struct TeamRow<'a> {
    team: &'a str,
    stadium: &'a str,
    scenarios: Vec<ScenarioRow<'a>>,
}

pub fn render_json(reports: &[TeamReport]) -> serde_json::Result<String> {
    let rows: Vec<TeamRow> = reports
        .iter()
        .map(|r| TeamRow {
            team: &r.team,
            stadium: &r.stadium,
            scenarios: r
                .scenarios
                .iter()
                .map(|s| ScenarioRow {
                    label: &s.label,
                    home_revenue: s.home_revenue,
                    away_revenue: s.away_revenue,
                    total: s.total(),
                })
                .collect(),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// `$1,234,567.89` style formatting.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bracket::{FlatGames, RoundSpec};
    use crate::roster::sample_roster;
    use approx::assert_relative_eq;

    fn record(name: &str, capacity: i64) -> TeamRecord {
        TeamRecord {
            name: name.into(),
            stadium: format!("{} Park", name),
            capacity,
            playoff_fill_rate: 1.0,
            world_series_fill_rate: 1.0,
        }
    }

    fn flat() -> BracketModel {
        BracketModel::flat(
            FlatGames { playoff: 2, world_series: 0 },
            FlatGames { playoff: 12, world_series: 4 },
        )
        .unwrap()
    }

    #[test]
    fn invalid_team_does_not_suppress_siblings() {
        let records = vec![record("SD", 40_000), record("XX", 0), record("HOU", 41_000)];
        let outcome = run_batch(records, &EconomicModel::default(), &flat());

        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.reports[0].team, "SD");
        assert_eq!(outcome.reports[1].team, "HOU");
        assert_relative_eq!(outcome.reports[0].scenarios[0].total(), 5_400_000.0, max_relative = 1e-9);
        assert_relative_eq!(outcome.reports[0].scenarios[1].total(), 51_600_000.0, max_relative = 1e-9);
        assert_relative_eq!(
            outcome.reports[1].scenarios[0].total(),
            41_000.0 * 450.0 * 0.15 * 2.0,
            max_relative = 1e-9
        );

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].team, "XX");
        assert!(matches!(outcome.failures[0].error, RevenueError::InvalidTeamData { .. }));
        assert!(!outcome.all_failed());
    }

    #[test]
    fn bad_bracket_fails_every_team_without_results() {
        let bracket = BracketModel::from_rounds(
            "broken",
            vec![RoundSpec::new("Wild Card Series", false, (2, -1), (1, 1))],
        );
        let outcome = run_batch(sample_roster(), &EconomicModel::default(), &bracket);
        assert!(outcome.reports.is_empty());
        assert_eq!(outcome.failures.len(), 11);
        assert!(outcome
            .failures
            .iter()
            .all(|f| matches!(f.error, RevenueError::InvalidScenarioInput { .. })));
        assert!(outcome.all_failed());
    }

    #[test]
    fn empty_batch_is_not_a_failure() {
        let outcome = run_batch(Vec::new(), &EconomicModel::default(), &flat());
        assert!(!outcome.all_failed());
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(5_400_000.0), "$5,400,000.00");
        assert_eq!(format_currency(1_234.5), "$1,234.50");
        assert_eq!(format_currency(-12.3), "-$12.30");
    }

    #[test]
    fn text_report_lists_each_scenario() {
        let outcome = run_batch(vec![record("SD", 40_000)], &EconomicModel::default(), &flat());
        let text = render_text(&outcome.reports);
        assert!(text.starts_with("Team: SD (SD Park)\n"));
        assert!(text.contains(
            "  Eliminated in Wild Card Series: $5,400,000.00 (home $0.00, away $5,400,000.00)"
        ));
        assert!(text.contains("  Reaches World Series Game 7: $51,600,000.00"));
    }

    #[test]
    fn json_report_includes_totals() {
        let outcome = run_batch(
            vec![record("SD", 40_000)],
            &EconomicModel::default(),
            &BracketModel::round_by_round(),
        );
        let json = render_json(&outcome.reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let scenarios = value[0]["scenarios"].as_array().unwrap();
        assert_eq!(value[0]["team"], "SD");
        assert_eq!(scenarios.len(), 5);
        let first = &scenarios[0];
        let total = first["total"].as_f64().unwrap();
        let home = first["home_revenue"].as_f64().unwrap();
        let away = first["away_revenue"].as_f64().unwrap();
        assert_relative_eq!(total, home + away, max_relative = 1e-12);
    }
}
