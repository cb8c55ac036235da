//! Report-ready view types handed to the presentation layer.
//!
//! These are owned, serializable snapshots materialised from the engine's
//! arena-backed hierarchy. Their JSON shape is what `audt report` prints.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Action, Attachment, Audit, ChecklistItem, Finding};
use crate::enums::{DocumentKind, FindingStatus, PermissionState, Severity};
use crate::errors::DataIntegrityWarning;

/// An attachment with its rendering class and, once resolved, its location.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentEntry {
    pub attachment: Attachment,
    pub kind: DocumentKind,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FindingEntry {
    pub finding: Finding,
    /// Derived at report time.
    pub status: FindingStatus,
    pub documents: Vec<DocumentEntry>,
}

/// A checklist item and its findings. `findings` is empty, never absent,
/// for items without findings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub item: ChecklistItem,
    pub findings: Vec<FindingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SectionGroup {
    pub name: String,
    pub unsectioned: bool,
    pub items: Vec<ChecklistEntry>,
}

/// An overdue action joined to its finding and department name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OverdueAction {
    pub action: Action,
    pub finding: Option<Finding>,
    pub department: String,
    pub days_overdue: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeptCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: usize,
}

/// Response from `build_report` / `audt report`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Report {
    pub audit: Audit,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<SectionGroup>,
    /// Documents attached to the audit rather than to a finding.
    pub audit_documents: Vec<DocumentEntry>,
    pub overdue_actions: Vec<OverdueAction>,
    pub dept_rollup: Vec<DeptCount>,
    pub severity_breakdown: Vec<SeverityCount>,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl Report {
    /// Every document in the report, audit-level first.
    pub fn documents_mut(&mut self) -> impl Iterator<Item = &mut DocumentEntry> {
        let nested = self
            .sections
            .iter_mut()
            .flat_map(|section| section.items.iter_mut())
            .flat_map(|entry| entry.findings.iter_mut())
            .flat_map(|finding| finding.documents.iter_mut());
        self.audit_documents.iter_mut().chain(nested)
    }

    #[must_use]
    pub fn checklist_item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// Response from `audt permission`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PermissionPreview {
    pub state: PermissionState,
    pub message: String,
}

impl From<PermissionState> for PermissionPreview {
    fn from(state: PermissionState) -> Self {
        Self {
            state,
            message: state.display_message().to_string(),
        }
    }
}
