//! Availability resolution: which dates and times are legally selectable.
//!
//! Everything here is a deterministic function of the schedule snapshot, the
//! booking horizon, and the candidate slot. The disabled-date set is derived
//! per call and never cached beyond a single resolution pass.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{FlowError, FlowResult};
use crate::models::schedule::BusinessScheduleModel;
use crate::models::time::{CalendarDate, ClockTime, MonthCursor, MINUTES_PER_DAY};

/// Inclusive booking horizon. `min_date` defaults to the current date at the
/// call site — same-day bookings are permitted unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    min_date: CalendarDate,
    max_date: CalendarDate,
}

impl AvailabilityWindow {
    pub fn new(min_date: CalendarDate, max_date: CalendarDate) -> FlowResult<Self> {
        if min_date > max_date {
            return Err(FlowError::InvalidWindow {
                message: format!("min_date {} is after max_date {}", min_date, max_date),
            });
        }
        Ok(Self { min_date, max_date })
    }

    /// The default horizon: `anchor` through `anchor + horizon_days`. The
    /// anchor is today when same-day booking is allowed, tomorrow otherwise.
    pub fn anchored_at(anchor: CalendarDate, horizon_days: u32) -> FlowResult<Self> {
        let max_date = anchor.add_days(horizon_days).ok_or_else(|| {
            FlowError::InvalidWindow {
                message: format!("{} + {} days overflows the calendar", anchor, horizon_days),
            }
        })?;
        Self::new(anchor, max_date)
    }

    pub fn min_date(&self) -> CalendarDate {
        self.min_date
    }

    pub fn max_date(&self) -> CalendarDate {
        self.max_date
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.min_date <= date && date <= self.max_date
    }
}

/// What to do when the schedule snapshot cannot be evaluated.
///
/// The default propagates the error: an all-available calendar rendered from
/// unusable data risks bookings outside real operating hours. `AssumeOpen`
/// is the explicit opt-in fallback that disables no dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    #[default]
    Propagate,
    AssumeOpen,
}

/// Compute the subset of `[min_date, max_date]` that must be disabled in the
/// calendar: blocked dates plus dates whose weekday is closed. Dates outside
/// the window are not part of the result; the month-navigation bounds keep
/// them unreachable.
pub fn compute_disabled_dates(
    schedule: &BusinessScheduleModel,
    window: &AvailabilityWindow,
    fallback: FallbackPolicy,
) -> FlowResult<BTreeSet<CalendarDate>> {
    if let Err(err) = schedule.validate() {
        match fallback {
            FallbackPolicy::Propagate => {
                return Err(FlowError::ScheduleUnavailable {
                    message: err.to_string(),
                });
            }
            FallbackPolicy::AssumeOpen => {
                log::warn!(
                    "schedule snapshot unusable ({}); caller opted into assuming all dates open",
                    err
                );
                return Ok(BTreeSet::new());
            }
        }
    }

    let mut disabled = BTreeSet::new();
    for date in window.min_date.iter_through(window.max_date) {
        if schedule.blocked_dates.contains(&date) || !schedule.is_open_on(date.weekday()) {
            disabled.insert(date);
        }
    }

    log::debug!(
        "disabled {} date(s) in window {}..={}",
        disabled.len(),
        window.min_date,
        window.max_date
    );
    Ok(disabled)
}

/// Why a `(date, time, duration)` triple is not bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotViolation {
    /// The business is closed on that weekday.
    ClosedDay,
    /// The appointment would run past midnight.
    CrossesMidnight,
    /// The appointment starts before opening or ends after closing.
    OutsideHours,
    /// The appointment overlaps a break window.
    InsideBreak,
    /// The date is fully blocked (closure).
    DateBlocked,
    /// The slot overlaps an existing appointment.
    AlreadyBooked,
}

impl fmt::Display for SlotViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SlotViolation::ClosedDay => "business closed this day",
            SlotViolation::CrossesMidnight => "appointment would cross midnight",
            SlotViolation::OutsideHours => "outside business hours",
            SlotViolation::InsideBreak => "inside a break",
            SlotViolation::DateBlocked => "date blocked",
            SlotViolation::AlreadyBooked => "slot already booked",
        };
        write!(f, "{}", reason)
    }
}

/// An already-booked `(date, time-range)` interval supplied by the
/// existing-appointments collaborator, subtracted from availability with the
/// same half-open overlap rule as break windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub date: CalendarDate,
    pub start: ClockTime,
    pub end: ClockTime,
}

/// Half-open interval overlap: `[a, b)` and `[c, d)` overlap iff
/// `a < d && c < b`.
fn intervals_overlap(a: u32, b: u32, c: u32, d: u32) -> bool {
    a < d && c < b
}

/// Check one candidate slot against the schedule, in rule order.
pub fn check_slot(
    schedule: &BusinessScheduleModel,
    date: CalendarDate,
    time: ClockTime,
    duration_minutes: u32,
    booked: &[BookedInterval],
) -> Result<(), SlotViolation> {
    let day = schedule
        .hours_for(date.weekday())
        .filter(|day| day.is_open)
        .ok_or(SlotViolation::ClosedDay)?;

    let start = time.minutes_from_midnight();
    // Checked: an oversized duration must not wrap past the day boundary.
    let end = match start.checked_add(duration_minutes) {
        Some(end) if end <= MINUTES_PER_DAY => end,
        _ => return Err(SlotViolation::CrossesMidnight),
    };

    if start < day.open.minutes_from_midnight() || end > day.close.minutes_from_midnight() {
        return Err(SlotViolation::OutsideHours);
    }

    for window in &day.breaks {
        if window.overlaps(start, end) {
            return Err(SlotViolation::InsideBreak);
        }
    }

    if schedule.blocked_dates.contains(&date) {
        return Err(SlotViolation::DateBlocked);
    }

    for interval in booked {
        if interval.date == date
            && intervals_overlap(
                start,
                end,
                interval.start.minutes_from_midnight(),
                interval.end.minutes_from_midnight(),
            )
        {
            return Err(SlotViolation::AlreadyBooked);
        }
    }

    Ok(())
}

/// Whether a specific `(date, time, duration)` triple is legal.
pub fn is_slot_valid(
    schedule: &BusinessScheduleModel,
    date: CalendarDate,
    time: ClockTime,
    duration_minutes: u32,
    booked: &[BookedInterval],
) -> bool {
    check_slot(schedule, date, time, duration_minutes, booked).is_ok()
}

/// Direction of the calendar's month-navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Prev,
    Next,
}

/// Whether a month page has any intersection with the booking horizon.
/// Pure boundary check; per-day open/closed state plays no part.
pub fn month_overlaps_window(cursor: &MonthCursor, window: &AvailabilityWindow) -> bool {
    cursor.first_day() <= window.max_date() && window.min_date() <= cursor.last_day()
}

/// Whether the prev/next month control is enabled: the adjacent month must
/// intersect the window, otherwise navigation there is disallowed.
pub fn can_navigate(cursor: &MonthCursor, step: MonthStep, window: &AvailabilityWindow) -> bool {
    let adjacent = match step {
        MonthStep::Prev => cursor.prev(),
        MonthStep::Next => cursor.next(),
    };
    month_overlaps_window(&adjacent, window)
}
