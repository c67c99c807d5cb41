//! Booking-step sequencer.
//!
//! A pure state machine over the ordered steps
//! `service → staff → date → time → confirm`. Everything is derived from the
//! caller's [`BookingSelection`] on every call — the sequencer holds no state
//! of its own, which is what makes the flow resumable from a shared address
//! and idempotent under reload.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FlowError, FlowResult};
use crate::models::selection::BookingSelection;

/// One stage of the booking wizard, in fixed total order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Service,
    Staff,
    Date,
    Time,
    Confirm,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Service,
        Step::Staff,
        Step::Date,
        Step::Time,
        Step::Confirm,
    ];

    fn position(&self) -> usize {
        match self {
            Step::Service => 0,
            Step::Staff => 1,
            Step::Date => 2,
            Step::Time => 3,
            Step::Confirm => 4,
        }
    }

    /// The immediately preceding step, `None` for the first.
    pub fn prev(&self) -> Option<Step> {
        self.position().checked_sub(1).map(|i| Step::ALL[i])
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Service => "service",
            Step::Staff => "staff",
            Step::Date => "date",
            Step::Time => "time",
            Step::Confirm => "confirm",
        };
        write!(f, "{}", name)
    }
}

/// A selection field a step depends on. Staff never appears here: choosing a
/// staff member is optional, so no later step requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    ServiceChosen,
    DateChosen,
    TimeChosen,
}

impl Requirement {
    pub fn satisfied(&self, selection: &BookingSelection) -> bool {
        match self {
            Requirement::ServiceChosen => selection.service_id.is_some(),
            Requirement::DateChosen => selection.date.is_some(),
            Requirement::TimeChosen => selection.time.is_some(),
        }
    }

    /// The step on which this requirement's field is populated.
    pub fn owning_step(&self) -> Step {
        match self {
            Requirement::ServiceChosen => Step::Service,
            Requirement::DateChosen => Step::Date,
            Requirement::TimeChosen => Step::Time,
        }
    }
}

/// Per-step prerequisite table. Adding or reordering a step means adding a
/// table entry, not branching logic in the callers.
pub fn requirements(step: Step) -> &'static [Requirement] {
    match step {
        Step::Service => &[],
        Step::Staff => &[Requirement::ServiceChosen],
        Step::Date => &[Requirement::ServiceChosen],
        Step::Time => &[Requirement::ServiceChosen, Requirement::DateChosen],
        Step::Confirm => &[
            Requirement::ServiceChosen,
            Requirement::DateChosen,
            Requirement::TimeChosen,
        ],
    }
}

/// Whether `step` is reachable given the current selection.
pub fn is_step_accessible(selection: &BookingSelection, step: Step) -> bool {
    requirements(step).iter().all(|r| r.satisfied(selection))
}

/// Canonical target of the "back" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackTarget {
    /// Return to a prior step; previously populated fields stay untouched.
    Step(Step),
    /// Leave the flow entirely, back to the business's landing context.
    Exit,
}

/// Back navigation from `step`: the immediate predecessor, or exit from the
/// first step.
pub fn back_target(step: Step) -> BackTarget {
    match step.prev() {
        Some(prev) => BackTarget::Step(prev),
        None => BackTarget::Exit,
    }
}

/// The redirect target for a refused navigation: the step owning the first
/// unmet requirement. Requirements are listed in step order and every earlier
/// one is satisfied at that point, so the returned step is itself accessible.
pub fn nearest_accessible(selection: &BookingSelection, requested: Step) -> Step {
    requirements(requested)
        .iter()
        .find(|r| !r.satisfied(selection))
        .map(|r| r.owning_step())
        .unwrap_or(requested)
}

/// Navigation outcome for one step evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepPlan {
    pub current_step: Step,
    pub back_target: BackTarget,
}

/// Evaluate the step implied by the caller's location against the selection.
///
/// Rejects the transition when the step is not reachable; refusing is the
/// only side effect, presenting the rejection is the caller's job.
pub fn evaluate(selection: &BookingSelection, requested: Step) -> FlowResult<StepPlan> {
    if !is_step_accessible(selection, requested) {
        let redirect = nearest_accessible(selection, requested);
        log::debug!(
            "refusing navigation to step `{}`, redirecting to `{}`",
            requested,
            redirect
        );
        return Err(FlowError::NavigationDenied { requested, redirect });
    }
    Ok(StepPlan {
        current_step: requested,
        back_target: back_target(requested),
    })
}
