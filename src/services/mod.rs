//! Service layer: the step sequencer, the availability resolver, and the
//! final request validator. Each service is a set of pure functions over the
//! immutable snapshots and the caller-owned selection record.

pub mod availability;
pub mod sequencer;
pub mod validation;

pub use availability::{
    can_navigate, check_slot, compute_disabled_dates, is_slot_valid, month_overlaps_window,
};
pub use sequencer::{back_target, evaluate, is_step_accessible, nearest_accessible};
pub use validation::validate_draft;

#[cfg(test)]
mod availability_tests;
