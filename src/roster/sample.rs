use crate::model::TeamRecord;

/// (name, stadium, capacity, playoff fill rate, World Series fill rate)
const SAMPLE_TEAMS: [(&str, &str, i64, f64, f64); 11] = [
    ("LAD", "Dodger Stadium", 56_000, 1.0, 1.0),
    ("SD", "Petco Park", 40_000, 1.0, 1.0),
    ("MIL", "American Family Field", 42_000, 0.97, 1.0),
    ("NYM", "Citi Field", 41_800, 1.0, 1.0),
    ("ATL", "Truist Park", 41_000, 1.0, 1.0),
    ("BAL", "Oriole Park", 45_000, 1.0, 1.0),
    ("NYY", "Yankee Stadium", 47_000, 1.0, 1.0),
    ("CLE", "Progressive Field", 34_800, 0.98, 1.0),
    ("HOU", "Minute Maid Park", 41_000, 1.0, 1.0),
    ("KS", "Kauffman Stadium", 37_000, 1.0, 1.0),
    ("DET", "Comerica Park", 41_000, 1.0, 1.0),
];

/// Eleven clubs from the 2024 postseason field, for runs without a data file.
pub fn sample_roster() -> Vec<TeamRecord> {
    SAMPLE_TEAMS
        .iter()
        .map(|&(name, stadium, capacity, playoff, world_series)| TeamRecord {
            name: name.to_string(),
            stadium: stadium.to_string(),
            capacity,
            playoff_fill_rate: playoff,
            world_series_fill_rate: world_series,
        })
        .collect()
}
