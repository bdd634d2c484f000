use serde::{Deserialize, Serialize};

use crate::error::{Result, RevenueError};

/// A team entry exactly as it appears in the roster data file.
///
/// Nothing is validated here; use [`Team::try_from`] to obtain a usable team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub name: String,
    pub stadium: String,
    /// Seats in the home stadium. Signed so that bad data reaches validation.
    pub capacity: i64,
    /// Expected fraction of seats sold for playoff-tier games (0.0–1.0)
    pub playoff_fill_rate: f64,
    /// Expected fraction of seats sold for World Series games (0.0–1.0)
    pub world_series_fill_rate: f64,
}

/// A validated franchise with its stadium and expected attendance.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    name: String,
    stadium: String,
    capacity: u32,
    playoff_fill_rate: f64,
    world_series_fill_rate: f64,
}

impl Team {
    /// Build a team, rejecting empty names, non-positive capacities and fill
    /// rates outside [0, 1]. Values are never clamped.
    pub fn new(
        name: impl Into<String>,
        stadium: impl Into<String>,
        capacity: i64,
        playoff_fill_rate: f64,
        world_series_fill_rate: f64,
    ) -> Result<Self> {
        let name = name.into();
        let stadium = stadium.into();

        if name.trim().is_empty() {
            return Err(RevenueError::team(name, "team name must not be empty"));
        }
        if stadium.trim().is_empty() {
            return Err(RevenueError::team(name, "stadium name must not be empty"));
        }
        if capacity <= 0 {
            return Err(RevenueError::team(
                name,
                format!("stadium capacity must be positive, got {}", capacity),
            ));
        }
        let capacity = u32::try_from(capacity).map_err(|_| {
            RevenueError::team(&name, format!("stadium capacity {} is out of range", capacity))
        })?;
        check_fill_rate(&name, "playoff", playoff_fill_rate)?;
        check_fill_rate(&name, "world series", world_series_fill_rate)?;

        Ok(Team {
            name,
            stadium,
            capacity,
            playoff_fill_rate,
            world_series_fill_rate,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stadium(&self) -> &str {
        &self.stadium
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Fill rate for the pricing tier of a round.
    pub fn fill_rate(&self, world_series: bool) -> f64 {
        if world_series {
            self.world_series_fill_rate
        } else {
            self.playoff_fill_rate
        }
    }
}

fn check_fill_rate(team: &str, tier: &str, rate: f64) -> Result<()> {
    // NaN fails the range check as well
    if !(0.0..=1.0).contains(&rate) {
        return Err(RevenueError::team(
            team,
            format!("{} fill rate must be between 0.0 and 1.0, got {}", tier, rate),
        ));
    }
    Ok(())
}

impl TryFrom<TeamRecord> for Team {
    type Error = RevenueError;

    fn try_from(record: TeamRecord) -> Result<Self> {
        Team::new(
            record.name,
            record.stadium,
            record.capacity,
            record.playoff_fill_rate,
            record.world_series_fill_rate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, capacity: i64, playoff: f64, world_series: f64) -> TeamRecord {
        TeamRecord {
            name: name.into(),
            stadium: "Petco Park".into(),
            capacity,
            playoff_fill_rate: playoff,
            world_series_fill_rate: world_series,
        }
    }

    #[test]
    fn valid_team_is_accepted() {
        let team = Team::try_from(record("SD", 40_000, 1.0, 0.95)).unwrap();
        assert_eq!(team.name(), "SD");
        assert_eq!(team.capacity(), 40_000);
        assert_eq!(team.fill_rate(false), 1.0);
        assert_eq!(team.fill_rate(true), 0.95);
    }

    #[test]
    fn fill_rate_bounds_are_inclusive() {
        assert!(Team::try_from(record("SD", 1, 0.0, 1.0)).is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Team::try_from(record("  ", 40_000, 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, RevenueError::InvalidTeamData { .. }));
    }

    #[test]
    fn empty_stadium_is_rejected() {
        let err = Team::new("SD", "", 40_000, 1.0, 1.0).unwrap_err();
        match err {
            RevenueError::InvalidTeamData { team, reason } => {
                assert_eq!(team, "SD");
                assert!(reason.contains("stadium"));
            }
            other => panic!("Expected InvalidTeamData, got {:?}", other),
        }
    }

    #[test]
    fn non_positive_capacity_is_rejected() {
        assert!(Team::try_from(record("SD", 0, 1.0, 1.0)).is_err());
        assert!(Team::try_from(record("SD", -5, 1.0, 1.0)).is_err());
    }

    #[test]
    fn oversized_capacity_is_rejected() {
        assert!(Team::try_from(record("SD", i64::from(u32::MAX) + 1, 1.0, 1.0)).is_err());
    }

    #[test]
    fn out_of_range_fill_rates_are_not_clamped() {
        assert!(Team::try_from(record("SD", 40_000, 1.01, 1.0)).is_err());
        assert!(Team::try_from(record("SD", 40_000, 1.0, -0.1)).is_err());
        assert!(Team::try_from(record("SD", 40_000, f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn record_uses_camel_case_field_names() {
        let json = r#"{
            "name": "LAD",
            "stadium": "Dodger Stadium",
            "capacity": 56000,
            "playoffFillRate": 1.0,
            "worldSeriesFillRate": 0.99
        }"#;
        let rec: TeamRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec, {
            let mut r = record("LAD", 56_000, 1.0, 0.99);
            r.stadium = "Dodger Stadium".into();
            r
        });
    }
}
