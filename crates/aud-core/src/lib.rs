//! # aud-core
//!
//! Core types and error taxonomy for Auditrail.
//!
//! This crate provides the foundational types shared across all Auditrail crates:
//! - Entity structs for the audit hierarchy (audits, checklist items, findings,
//!   attachments, actions, access grants) plus departments and user accounts
//! - Status enums with state machine transitions
//! - ID prefix constants and formatting helpers
//! - Validation, data-integrity, and collaborator error types
//! - Report response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
