//! The wizard's entire state: the customer's running selection.
//!
//! The selection is the single source of truth for the flow. Its serialized
//! form is the query string of the resumable address, so any step can be
//! reached from a saved or shared link and a reload reconstructs identical
//! state. No server session is involved.

use serde::{Deserialize, Serialize};

use crate::api::{ServiceId, StaffId};
use crate::error::{FlowError, FlowResult};
use crate::models::time::{CalendarDate, ClockTime};

const PARAM_SERVICE: &str = "serviceId";
const PARAM_STAFF: &str = "staffId";
const PARAM_DATE: &str = "date";
const PARAM_TIME: &str = "time";

/// Selection record, one field per wizard step. Created empty when the flow
/// starts; discarded once submission succeeds or the flow is abandoned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub service_id: Option<ServiceId>,
    pub staff_id: Option<StaffId>,
    pub date: Option<CalendarDate>,
    pub time: Option<ClockTime>,
}

impl BookingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, id: ServiceId) -> Self {
        self.service_id = Some(id);
        self
    }

    pub fn with_staff(mut self, id: StaffId) -> Self {
        self.staff_id = Some(id);
        self
    }

    pub fn with_date(mut self, date: CalendarDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_time(mut self, time: ClockTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Hard reset of a stale service reference; never substitutes another.
    pub fn reset_service(&mut self) {
        self.service_id = None;
    }

    /// Hard reset of a stale staff reference.
    pub fn reset_staff(&mut self) {
        self.staff_id = None;
    }

    /// Serialize the populated fields as the resumable-address query string.
    pub fn to_query(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(id) = &self.service_id {
            serializer.append_pair(PARAM_SERVICE, id.value());
        }
        if let Some(id) = &self.staff_id {
            serializer.append_pair(PARAM_STAFF, id.value());
        }
        if let Some(date) = &self.date {
            serializer.append_pair(PARAM_DATE, &date.to_string());
        }
        if let Some(time) = &self.time {
            serializer.append_pair(PARAM_TIME, &time.to_string());
        }
        serializer.finish()
    }

    /// Reconstruct a selection from a resumable-address query string.
    ///
    /// Keys other than the four selection parameters are ignored (the host
    /// page may carry its own), and an empty value counts as the parameter
    /// being absent. A malformed `date` or `time` value is an error: a link
    /// that cannot reproduce state must not half-load.
    pub fn from_query(query: &str) -> FlowResult<Self> {
        let mut selection = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                PARAM_SERVICE => {
                    selection.service_id = Some(ServiceId::new(value.into_owned()));
                }
                PARAM_STAFF => {
                    selection.staff_id = Some(StaffId::new(value.into_owned()));
                }
                PARAM_DATE => {
                    let date = value.parse::<CalendarDate>().map_err(|err| {
                        FlowError::AddressDecode {
                            message: err.to_string(),
                        }
                    })?;
                    selection.date = Some(date);
                }
                PARAM_TIME => {
                    let time = value.parse::<ClockTime>().map_err(|err| {
                        FlowError::AddressDecode {
                            message: err.to_string(),
                        }
                    })?;
                    selection.time = Some(time);
                }
                _ => {}
            }
        }
        Ok(selection)
    }
}
