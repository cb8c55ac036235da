//! Error taxonomy shared by all Auditrail crates.
//!
//! - [`ValidationErrors`]: field-keyed guard failures, always recoverable and
//!   rendered to the user all at once.
//! - [`DataIntegrityWarning`]: upstream data defects that are logged and
//!   excluded from output without aborting.
//! - [`CollaboratorError`]: failures reported by the excluded I/O layer,
//!   passed through as typed values.
//!
//! [`CoreError`] is the umbrella for callers that want a single error type.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ValidationErrors
// ---------------------------------------------------------------------------

/// Field name → message. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A result carrying exactly one field error.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record an error for `field`. The first message recorded for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ---------------------------------------------------------------------------
// DataIntegrityWarning
// ---------------------------------------------------------------------------

/// A defect in upstream data detected while building a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityWarning {
    /// Checklist item tagged with a different audit.
    ForeignChecklistItem { item_id: String, audit_id: String },
    /// Two checklist items share an id; findings attach to the first.
    DuplicateChecklistItem { item_id: String },
    /// Two findings share an id; the first placed copy is kept.
    DuplicateFinding { finding_id: String },
    /// Finding tagged with a different audit.
    ForeignFinding { finding_id: String, audit_id: String },
    /// Finding whose `audit_item_id` matches no checklist item.
    OrphanFinding {
        finding_id: String,
        audit_item_id: String,
    },
    /// Attachment whose owner matches neither a kept finding nor the audit.
    OrphanAttachment {
        attachment_id: String,
        finding_id: Option<String>,
    },
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignChecklistItem { item_id, audit_id } => {
                write!(f, "checklist item {item_id} belongs to audit {audit_id}")
            }
            Self::DuplicateChecklistItem { item_id } => {
                write!(f, "duplicate checklist item id {item_id}")
            }
            Self::DuplicateFinding { finding_id } => {
                write!(f, "duplicate finding id {finding_id}")
            }
            Self::ForeignFinding {
                finding_id,
                audit_id,
            } => write!(f, "finding {finding_id} belongs to audit {audit_id}"),
            Self::OrphanFinding {
                finding_id,
                audit_item_id,
            } => write!(
                f,
                "finding {finding_id} references unknown checklist item {audit_item_id}"
            ),
            Self::OrphanAttachment {
                attachment_id,
                finding_id: Some(finding_id),
            } => write!(
                f,
                "attachment {attachment_id} references unknown finding {finding_id}"
            ),
            Self::OrphanAttachment {
                attachment_id,
                finding_id: None,
            } => write!(f, "attachment {attachment_id} has no owner in this audit"),
        }
    }
}

// ---------------------------------------------------------------------------
// CollaboratorError
// ---------------------------------------------------------------------------

/// Failure reported by an external collaborator (fetch, storage, events).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    /// An entity collection could not be loaded.
    #[error("Failed to load {collection}: {reason}")]
    Fetch { collection: String, reason: String },

    /// A storage reference could not be resolved to a renderable location.
    #[error("Failed to resolve storage reference {reference}: {reason}")]
    Storage { reference: String, reason: String },

    /// The collaborator is not reachable at all.
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),
}

impl CollaboratorError {
    pub fn fetch(collection: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Fetch {
            collection: collection.into(),
            reason: reason.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// CoreError
// ---------------------------------------------------------------------------

/// Errors that can be raised by any Auditrail crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One or more fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// An external collaborator failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
