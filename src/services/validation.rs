//! Final validation of the candidate appointment payload.
//!
//! Field-level rules run first and are always all evaluated, so the report
//! covers every field that needs correction in one pass. Cross-field rules
//! (no-past-booking, schedule conformance) run only once the fields are
//! individually sound. The current instant is injected by the caller; apart
//! from that one clock read, validation is a pure function of its inputs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::api::{AppointmentDraft, AppointmentRequest, BusinessId};
use crate::models::catalog::BusinessCatalog;
use crate::models::schedule::BusinessScheduleModel;
use crate::models::time::{CalendarDate, ClockTime};
use crate::services::availability::{check_slot, BookedInterval, SlotViolation};

/// Courtesy pre-submission cap on customer notes; the server-side limit is
/// authoritative.
pub const MAX_NOTE_LEN: usize = 500;

/// Payload field an issue is reported against. `Display` yields the wire
/// key so a consuming interface can highlight the matching input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RequestField {
    BusinessId,
    ServiceId,
    StaffId,
    Date,
    StartTime,
    CustomerNotes,
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            RequestField::BusinessId => "businessId",
            RequestField::ServiceId => "serviceId",
            RequestField::StaffId => "staffId",
            RequestField::Date => "date",
            RequestField::StartTime => "startTime",
            RequestField::CustomerNotes => "customerNotes",
        };
        write!(f, "{}", key)
    }
}

/// Reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Required field is empty.
    Empty,
    /// Field does not match the business this flow belongs to.
    Mismatch,
    /// Referenced service no longer exists or was deactivated.
    UnknownService,
    /// Referenced staff member no longer exists, was deactivated, or does
    /// not offer the chosen service.
    UnknownStaff,
    /// Not a YYYY-MM-DD calendar date.
    BadDateFormat,
    /// Not an HH:MM 24-hour clock time.
    BadTimeFormat,
    /// Customer notes exceed [`MAX_NOTE_LEN`] characters.
    NotesTooLong(usize),
    /// The combined date and start time are not in the future.
    InPast,
    /// The slot fails the availability rules; the violation says which one.
    Slot(SlotViolation),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Empty => write!(f, "must not be empty"),
            ValidationIssue::Mismatch => write!(f, "does not match this business"),
            ValidationIssue::UnknownService => {
                write!(f, "service is no longer offered, please choose again")
            }
            ValidationIssue::UnknownStaff => {
                write!(f, "staff member is no longer available, please choose again")
            }
            ValidationIssue::BadDateFormat => write!(f, "expected a YYYY-MM-DD date"),
            ValidationIssue::BadTimeFormat => write!(f, "expected an HH:MM time"),
            ValidationIssue::NotesTooLong(len) => {
                write!(f, "notes are {} characters, the limit is {}", len, MAX_NOTE_LEN)
            }
            ValidationIssue::InPast => write!(f, "appointment must be in the future"),
            ValidationIssue::Slot(violation) => write!(f, "{}", violation),
        }
    }
}

/// Per-field validation outcome. One reason per field; the flow stays
/// interactive and the rest of the selection is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub field_errors: BTreeMap<RequestField, ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    fn push(&mut self, field: RequestField, issue: ValidationIssue) {
        self.field_errors.entry(field).or_insert(issue);
    }
}

/// Validate a draft end-to-end against the catalog and schedule snapshot.
///
/// `now` is the injected current instant for the no-past-booking rule.
/// Returns the typed, submittable request, or the per-field report.
pub fn validate_draft(
    draft: &AppointmentDraft,
    catalog: &BusinessCatalog,
    schedule: &BusinessScheduleModel,
    booked: &[BookedInterval],
    now: NaiveDateTime,
) -> Result<AppointmentRequest, ValidationReport> {
    let mut report = ValidationReport::default();

    if draft.business_id.trim().is_empty() {
        report.push(RequestField::BusinessId, ValidationIssue::Empty);
    } else if draft.business_id != catalog.business_id.value() {
        report.push(RequestField::BusinessId, ValidationIssue::Mismatch);
    }

    let mut service = None;
    if draft.service_id.trim().is_empty() {
        report.push(RequestField::ServiceId, ValidationIssue::Empty);
    } else {
        match catalog.find_service(&crate::api::ServiceId::new(draft.service_id.clone())) {
            Some(offering) => service = Some(offering),
            None => report.push(RequestField::ServiceId, ValidationIssue::UnknownService),
        }
    }

    let mut staff_id = None;
    if let Some(raw_staff) = &draft.staff_id {
        if raw_staff.trim().is_empty() {
            report.push(RequestField::StaffId, ValidationIssue::Empty);
        } else {
            let candidate = crate::api::StaffId::new(raw_staff.clone());
            let resolved = catalog.find_staff(&candidate).filter(|member| {
                service.map(|svc| member.offers(&svc.id)).unwrap_or(true)
            });
            match resolved {
                Some(_) => staff_id = Some(candidate),
                None => report.push(RequestField::StaffId, ValidationIssue::UnknownStaff),
            }
        }
    }

    let date = draft.date.parse::<CalendarDate>();
    if date.is_err() {
        report.push(RequestField::Date, ValidationIssue::BadDateFormat);
    }

    let start_time = draft.start_time.parse::<ClockTime>();
    if start_time.is_err() {
        report.push(RequestField::StartTime, ValidationIssue::BadTimeFormat);
    }

    if let Some(notes) = &draft.customer_notes {
        let len = notes.chars().count();
        if len > MAX_NOTE_LEN {
            report.push(RequestField::CustomerNotes, ValidationIssue::NotesTooLong(len));
        }
    }

    if !report.is_valid() {
        log::debug!(
            "draft rejected on {} field(s) before cross-field checks",
            report.field_errors.len()
        );
        return Err(report);
    }

    // Every field passed individually, so these all hold values.
    let (Ok(date), Ok(start_time), Some(service)) = (date, start_time, service) else {
        return Err(report);
    };

    if date.and_time(start_time) <= now {
        report.push(RequestField::StartTime, ValidationIssue::InPast);
    } else if let Err(violation) =
        check_slot(schedule, date, start_time, service.duration_minutes, booked)
    {
        log::debug!("slot {} {} rejected: {}", date, start_time, violation);
        report.push(RequestField::StartTime, ValidationIssue::Slot(violation));
    }

    if !report.is_valid() {
        return Err(report);
    }

    Ok(AppointmentRequest {
        business_id: BusinessId::new(draft.business_id.clone()),
        service_id: service.id.clone(),
        staff_id,
        date,
        start_time,
        customer_notes: draft.customer_notes.clone(),
    })
}
