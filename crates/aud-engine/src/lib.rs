//! # aud-engine
//!
//! Computation core for Auditrail.
//!
//! - [`hierarchy`]: flat records → Audit → Section → Checklist → Finding →
//!   Attachment tree
//! - [`compliance`]: overdue actions, department rollups, severity breakdown,
//!   document classification
//! - [`workflow`]: audit-plan state machine, schedule validation, and the
//!   sensitive-audit permission step
//! - [`query`]: list filtering and date sorting
//! - [`collaborators`]: traits for the fetch, storage, and approval layers
//! - [`report`]: one-call report assembly
//!
//! Everything is synchronous and takes `now` as a parameter; there is no
//! global state.

pub mod collaborators;
pub mod compliance;
pub mod hierarchy;
pub mod query;
pub mod report;
pub mod workflow;

#[cfg(test)]
mod test_support;

pub use compliance::classify_document;
pub use hierarchy::{AuditHierarchy, build_hierarchy};
pub use report::{build_report, build_report_from, resolve_links};
pub use workflow::permission::derive_permission_state;
pub use workflow::schedule::validate_schedule;
pub use workflow::{PlanDraft, PlanEvent, transition};
