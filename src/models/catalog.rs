//! Active service/staff catalog for one business.
//!
//! Fetched alongside the schedule snapshot and, like it, immutable for the
//! session. The catalog is also the authority for stale-selection handling:
//! a selection referencing an entity that was deactivated between steps is
//! hard-reset, never silently swapped for a different one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::{BusinessId, ServiceId, StaffId};
use crate::models::selection::BookingSelection;

fn default_active() -> bool {
    true
}

/// One bookable service. The duration drives every slot-validity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: ServiceId,
    pub name: String,
    pub duration_minutes: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// One staff member. An empty `service_ids` list means the member offers
/// every service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    #[serde(default)]
    pub service_ids: Vec<ServiceId>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl StaffMember {
    pub fn offers(&self, service: &ServiceId) -> bool {
        self.service_ids.is_empty() || self.service_ids.contains(service)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCatalog {
    pub business_id: BusinessId,
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
}

impl BusinessCatalog {
    /// Look up an *active* service; deactivated entries are invisible.
    pub fn find_service(&self, id: &ServiceId) -> Option<&ServiceOffering> {
        self.services.iter().find(|s| s.active && &s.id == id)
    }

    /// Look up an *active* staff member.
    pub fn find_staff(&self, id: &StaffId) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.active && &s.id == id)
    }

    /// Reconcile a selection against the current catalog.
    ///
    /// A stale `service_id` or `staff_id` (missing, deactivated, or a staff
    /// member who no longer offers the chosen service) is reset to `None`
    /// and reported so the flow can force re-selection of that step.
    pub fn reconcile(&self, selection: &BookingSelection) -> ReconcileOutcome {
        let mut reconciled = selection.clone();
        let mut reset_fields = Vec::new();

        if let Some(service_id) = &reconciled.service_id {
            if self.find_service(service_id).is_none() {
                log::debug!("service `{}` is stale, resetting", service_id);
                reconciled.reset_service();
                reset_fields.push(SelectionField::Service);
            }
        }

        if let Some(staff_id) = reconciled.staff_id.clone() {
            let stale = match self.find_staff(&staff_id) {
                None => true,
                Some(member) => match &reconciled.service_id {
                    Some(service_id) => !member.offers(service_id),
                    None => false,
                },
            };
            if stale {
                log::debug!("staff `{}` is stale, resetting", staff_id);
                reconciled.reset_staff();
                reset_fields.push(SelectionField::Staff);
            }
        }

        ReconcileOutcome {
            selection: reconciled,
            reset_fields,
        }
    }
}

/// Selection field cleared by reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionField {
    Service,
    Staff,
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionField::Service => write!(f, "service"),
            SelectionField::Staff => write!(f, "staff"),
        }
    }
}

/// Result of [`BusinessCatalog::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub selection: BookingSelection,
    pub reset_fields: Vec<SelectionField>,
}

impl ReconcileOutcome {
    pub fn is_clean(&self) -> bool {
        self.reset_fields.is_empty()
    }
}

fn validate_input_catalog(catalog_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(catalog_json).context("Invalid catalog JSON")?;
    let has_business = value
        .as_object()
        .and_then(|obj| obj.get("business_id"))
        .is_some();
    if !has_business {
        anyhow::bail!("Missing required 'business_id' field");
    }
    Ok(())
}

/// Parse a service/staff catalog from collaborator JSON.
pub fn parse_catalog_json_str(catalog_json: &str) -> Result<BusinessCatalog> {
    validate_input_catalog(catalog_json)?;
    serde_json::from_str(catalog_json).context("Failed to deserialize catalog JSON using Serde")
}
