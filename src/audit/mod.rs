//! Audit logging for fintrack
//!
//! Every create, update and delete of a transaction or budget is appended to
//! `audit.log` as one JSON object per line, with the entity's state before
//! and after the change.
//!
//! - `AuditEntry`: a single record (timestamp, operation, entity, states).
//! - `AuditLogger`: appends entries and reads them back.
//! - `generate_diff`: one-line summary of the fields that changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
