pub mod bracket;
pub mod economics;
pub mod revenue;
pub mod team;

pub use bracket::BracketModel;
pub use economics::EconomicModel;
pub use revenue::{compute_scenarios, ScenarioResult};
pub use team::{Team, TeamRecord};
