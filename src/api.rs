//! Public API surface for the booking-flow core.
//!
//! This file consolidates the identifier newtypes and the submission payload
//! types. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::schedule::{BreakWindow, BusinessScheduleModel, DayHours};
pub use crate::models::selection::BookingSelection;
pub use crate::models::time::{CalendarDate, ClockTime, MonthCursor, Weekday};
pub use crate::services::availability::AvailabilityWindow;
pub use crate::services::availability::BookedInterval;
pub use crate::services::availability::FallbackPolicy;
pub use crate::services::availability::SlotViolation;
pub use crate::services::sequencer::BackTarget;
pub use crate::services::sequencer::Step;
pub use crate::services::sequencer::StepPlan;
pub use crate::services::validation::RequestField;
pub use crate::services::validation::ValidationIssue;
pub use crate::services::validation::ValidationReport;

use serde::{Deserialize, Serialize};

/// Business identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(pub String);

/// Service identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub String);

/// Staff identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(pub String);

impl BusinessId {
    pub fn new(value: impl Into<String>) -> Self {
        BusinessId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ServiceId {
    pub fn new(value: impl Into<String>) -> Self {
        ServiceId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl StaffId {
    pub fn new(value: impl Into<String>) -> Self {
        StaffId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BusinessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw candidate payload as assembled by the confirm step, before any
/// validation. All fields arrive as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    pub business_id: String,
    pub service_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    pub date: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

/// Validated candidate payload, handed to the submission collaborator only
/// after the validator accepts the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub business_id: BusinessId,
    pub service_id: ServiceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<StaffId>,
    pub date: CalendarDate,
    pub start_time: ClockTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}
