//! # Bookflow
//!
//! Appointment-booking flow core for service businesses.
//!
//! This crate drives the multi-stage "choose service → choose staff →
//! choose date → choose time → confirm" wizard: it reconstructs state from a
//! resumable address, enforces step-prerequisite rules, computes which
//! calendar dates and times are legally selectable given business operating
//! hours and exclusion windows, and validates the candidate appointment
//! before it is handed to the submission collaborator.
//!
//! ## Features
//!
//! - **Data Loading**: Parse schedule snapshots and service/staff catalogs
//!   from collaborator JSON, with invariant checks and snapshot checksums
//! - **Step Sequencing**: Pure, stateless step machine with a
//!   prerequisite table; resumable and idempotent under reload
//! - **Availability Resolution**: Disabled-date computation, slot validity,
//!   break/booked-interval overlap, month-navigation bounds
//! - **Request Validation**: Per-field reports plus cross-field
//!   no-past-booking and schedule-conformance rules
//!
//! ## Architecture
//!
//! - [`api`]: Identifier newtypes and the submission payload types
//! - [`models`]: Time primitives, schedule snapshot, catalog, selection
//! - [`services`]: Sequencer, availability resolver, request validator
//! - [`config`]: TOML-backed horizon configuration
//! - [`error`]: The flow error taxonomy
//!
//! The core is single-threaded, synchronous and performs no I/O of its own;
//! fetching schedule and catalog data belongs to the surrounding
//! application.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
