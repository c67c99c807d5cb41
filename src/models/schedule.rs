// ============================================================================
// Business Schedule Snapshot
// ============================================================================
//
// Read-only weekly operating hours, per-day break windows, and fully blocked
// dates for one business. Fetched once per flow from the business-data
// collaborator and treated as immutable for the rest of the session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::time::{CalendarDate, ClockTime, Weekday};

/// A sub-interval of a day's open hours during which nothing may be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl BreakWindow {
    /// Half-open overlap against `[start_min, end_min)` in minutes since
    /// midnight: `[a, b)` and `[c, d)` overlap iff `a < d && c < b`.
    pub fn overlaps(&self, start_min: u32, end_min: u32) -> bool {
        start_min < self.end.minutes_from_midnight()
            && self.start.minutes_from_midnight() < end_min
    }
}

/// Operating hours for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub is_open: bool,
    #[serde(default = "ClockTime::midnight")]
    pub open: ClockTime,
    #[serde(default = "ClockTime::midnight")]
    pub close: ClockTime,
    #[serde(default)]
    pub breaks: Vec<BreakWindow>,
}

impl DayHours {
    pub fn closed() -> Self {
        Self {
            is_open: false,
            open: ClockTime::midnight(),
            close: ClockTime::midnight(),
            breaks: Vec::new(),
        }
    }
}

/// Immutable snapshot of a business's bookable hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessScheduleModel {
    pub weekly_hours: BTreeMap<Weekday, DayHours>,
    #[serde(default)]
    pub blocked_dates: BTreeSet<CalendarDate>,
    #[serde(default)]
    pub checksum: String,
}

impl BusinessScheduleModel {
    pub fn hours_for(&self, weekday: Weekday) -> Option<&DayHours> {
        self.weekly_hours.get(&weekday)
    }

    /// Whether the business opens at all on this weekday.
    pub fn is_open_on(&self, weekday: Weekday) -> bool {
        self.weekly_hours
            .get(&weekday)
            .map(|day| day.is_open)
            .unwrap_or(false)
    }

    /// Check the snapshot invariants: `open < close` on every open day, and
    /// break windows non-overlapping and contained within `[open, close)`.
    pub fn validate(&self) -> Result<()> {
        for (weekday, day) in &self.weekly_hours {
            if !day.is_open {
                continue;
            }
            if day.open >= day.close {
                anyhow::bail!(
                    "{}: open {} must be before close {}",
                    weekday,
                    day.open,
                    day.close
                );
            }
            let mut windows: Vec<&BreakWindow> = day.breaks.iter().collect();
            windows.sort_by_key(|w| w.start);
            for window in &windows {
                if window.start >= window.end {
                    anyhow::bail!(
                        "{}: break {}-{} is empty or inverted",
                        weekday,
                        window.start,
                        window.end
                    );
                }
                if window.start < day.open || window.end > day.close {
                    anyhow::bail!(
                        "{}: break {}-{} lies outside open hours {}-{}",
                        weekday,
                        window.start,
                        window.end,
                        day.open,
                        day.close
                    );
                }
            }
            for pair in windows.windows(2) {
                if pair[1].start < pair[0].end {
                    anyhow::bail!(
                        "{}: breaks {}-{} and {}-{} overlap",
                        weekday,
                        pair[0].start,
                        pair[0].end,
                        pair[1].start,
                        pair[1].end
                    );
                }
            }
        }
        Ok(())
    }
}

#[derive(serde::Deserialize)]
struct ScheduleInput {
    #[serde(default)]
    pub checksum: String,
    pub weekly_hours: BTreeMap<Weekday, DayHours>,
    #[serde(default)]
    pub blocked_dates: BTreeSet<CalendarDate>,
}

fn validate_input_schedule(schedule_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(schedule_json).context("Invalid schedule JSON")?;
    let has_hours = value
        .as_object()
        .and_then(|obj| obj.get("weekly_hours"))
        .is_some();
    if !has_hours {
        anyhow::bail!("Missing required 'weekly_hours' field");
    }
    Ok(())
}

/// Parse a business schedule snapshot from JSON.
///
/// Weekdays absent from `weekly_hours` default to closed, so a business that
/// only lists its open days still yields a complete seven-day table. The
/// snapshot invariants are enforced here; a snapshot that parses is safe to
/// resolve availability against. A checksum is computed from the source JSON
/// when the collaborator does not supply one.
pub fn parse_schedule_json_str(schedule_json: &str) -> Result<BusinessScheduleModel> {
    validate_input_schedule(schedule_json)?;

    let input: ScheduleInput = serde_json::from_str(schedule_json)
        .context("Failed to deserialize schedule JSON using Serde")?;

    let mut weekly_hours = input.weekly_hours;
    for weekday in Weekday::ALL {
        weekly_hours.entry(weekday).or_insert_with(DayHours::closed);
    }

    let mut schedule = BusinessScheduleModel {
        weekly_hours,
        blocked_dates: input.blocked_dates,
        checksum: input.checksum,
    };

    schedule
        .validate()
        .context("Schedule snapshot violates its invariants")?;

    if schedule.checksum.is_empty() {
        schedule.checksum = compute_schedule_checksum(schedule_json);
    }

    Ok(schedule)
}

/// Compute a checksum for the schedule JSON
fn compute_schedule_checksum(json_str: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(json_str.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

// ============================================================================
// Tests
// ============================================================================
