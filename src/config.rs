//! Booking-flow configuration file support.
//!
//! Horizon and same-day policy are deployment-tunable; everything else in
//! the flow is data-driven. Values are read from TOML with serde defaults,
//! so an empty file yields the stock fourteen-day, same-day-allowed window.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{FlowError, FlowResult};
use crate::models::time::CalendarDate;
use crate::services::availability::AvailabilityWindow;

/// Flow configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Number of days past `min_date` the horizon extends.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Whether the current date itself is bookable.
    #[serde(default = "default_same_day")]
    pub same_day: bool,
}

fn default_horizon_days() -> u32 {
    14
}

fn default_same_day() -> bool {
    true
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            same_day: default_same_day(),
        }
    }
}

impl BookingConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse booking configuration TOML")
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Build the booking horizon anchored at `today`.
    pub fn window_from(&self, today: CalendarDate) -> FlowResult<AvailabilityWindow> {
        let min_date = if self.same_day {
            today
        } else {
            today.succ().ok_or_else(|| FlowError::InvalidWindow {
                message: format!("no calendar day after {}", today),
            })?
        };
        AvailabilityWindow::anchored_at(min_date, self.horizon_days)
    }
}
