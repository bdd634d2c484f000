//! Ticket prices and gate revenue sharing between home and visiting clubs.

use crate::config::Parameters;
use crate::error::{Result, RevenueError};

pub const KEY_TICKET_PRICE_PLAYOFF: &str = "ticket.price.playoff";
pub const KEY_TICKET_PRICE_WORLD_SERIES: &str = "ticket.price.worldseries";
pub const KEY_SHARE_HOME: &str = "revenue.share.home";
pub const KEY_SHARE_AWAY: &str = "revenue.share.away";

pub const DEFAULT_TICKET_PRICE_PLAYOFF: f64 = 450.0;
pub const DEFAULT_TICKET_PRICE_WORLD_SERIES: f64 = 800.0;
pub const DEFAULT_SHARE_HOME: f64 = 0.85;
pub const DEFAULT_SHARE_AWAY: f64 = 0.15;

/// Maximum allowed deviation of `home_share + away_share` from 1.
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// Which club's share of the gate applies to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicModel {
    ticket_price_playoff: f64,
    ticket_price_world_series: f64,
    home_share: f64,
    away_share: f64,
}

impl Default for EconomicModel {
    fn default() -> Self {
        EconomicModel {
            ticket_price_playoff: DEFAULT_TICKET_PRICE_PLAYOFF,
            ticket_price_world_series: DEFAULT_TICKET_PRICE_WORLD_SERIES,
            home_share: DEFAULT_SHARE_HOME,
            away_share: DEFAULT_SHARE_AWAY,
        }
    }
}

impl EconomicModel {
    pub fn new(
        ticket_price_playoff: f64,
        ticket_price_world_series: f64,
        home_share: f64,
        away_share: f64,
    ) -> Result<Self> {
        check_price(KEY_TICKET_PRICE_PLAYOFF, ticket_price_playoff)?;
        check_price(KEY_TICKET_PRICE_WORLD_SERIES, ticket_price_world_series)?;
        check_share(KEY_SHARE_HOME, home_share)?;
        check_share(KEY_SHARE_AWAY, away_share)?;

        if (home_share + away_share - 1.0).abs() > SHARE_TOLERANCE {
            return Err(RevenueError::config(format!(
                "revenue shares must sum to 1 (home {} + away {} = {})",
                home_share,
                away_share,
                home_share + away_share
            )));
        }

        Ok(EconomicModel {
            ticket_price_playoff,
            ticket_price_world_series,
            home_share,
            away_share,
        })
    }

    /// Build the model from the parameter store, falling back to the defaults
    /// for absent keys. A present but non-numeric value is an error naming the key.
    pub fn from_parameters(params: &Parameters) -> Result<Self> {
        Self::new(
            params.get_f64(KEY_TICKET_PRICE_PLAYOFF, DEFAULT_TICKET_PRICE_PLAYOFF)?,
            params.get_f64(KEY_TICKET_PRICE_WORLD_SERIES, DEFAULT_TICKET_PRICE_WORLD_SERIES)?,
            params.get_f64(KEY_SHARE_HOME, DEFAULT_SHARE_HOME)?,
            params.get_f64(KEY_SHARE_AWAY, DEFAULT_SHARE_AWAY)?,
        )
    }

    pub fn ticket_price_playoff(&self) -> f64 {
        self.ticket_price_playoff
    }

    pub fn ticket_price_world_series(&self) -> f64 {
        self.ticket_price_world_series
    }

    pub fn home_share(&self) -> f64 {
        self.home_share
    }

    pub fn away_share(&self) -> f64 {
        self.away_share
    }

    /// Ticket price for the pricing tier of a round.
    pub fn ticket_price(&self, world_series: bool) -> f64 {
        if world_series {
            self.ticket_price_world_series
        } else {
            self.ticket_price_playoff
        }
    }

    pub fn share(&self, side: Side) -> f64 {
        match side {
            Side::Home => self.home_share,
            Side::Away => self.away_share,
        }
    }
}

fn check_price(key: &str, price: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(RevenueError::config(format!(
            "{} must be a positive amount, got {}",
            key, price
        )));
    }
    Ok(())
}

fn check_share(key: &str, share: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&share) {
        return Err(RevenueError::config(format!(
            "{} must be between 0.0 and 1.0, got {}",
            key, share
        )));
    }
    Ok(())
}
