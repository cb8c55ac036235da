//! Seams to the excluded I/O layer.
//!
//! Fetching, storage, and approval events live outside the engine. The traits
//! here are what the engine calls; collaborators hand back already-resolved
//! in-memory values or a [`CollaboratorError`]. The engine never retries.

use std::collections::HashMap;

use aud_config::ScheduleConfig;
use aud_core::entities::{Action, Attachment, ChecklistItem, Department, Finding};
use aud_core::enums::PlanState;
use aud_core::errors::{CollaboratorError, CoreError};

use crate::workflow::{PlanDraft, PlanEvent};

// ---------------------------------------------------------------------------
// Entity fetch
// ---------------------------------------------------------------------------

/// Filter passed to [`EntitySource::load_actions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionQuery {
    pub finding_ids: Vec<String>,
    pub department_id: Option<String>,
}

/// Loads unordered entity collections.
pub trait EntitySource {
    fn load_checklist_items(&self, audit_id: &str)
    -> Result<Vec<ChecklistItem>, CollaboratorError>;

    fn load_findings(&self, audit_item_ids: &[&str]) -> Result<Vec<Finding>, CollaboratorError>;

    fn load_attachments(&self, finding_ids: &[&str])
    -> Result<Vec<Attachment>, CollaboratorError>;

    fn load_actions(&self, query: &ActionQuery) -> Result<Vec<Action>, CollaboratorError>;

    fn load_departments(&self) -> Result<Vec<Department>, CollaboratorError>;
}

/// Every collection a report needs, fetched for one audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportInputs {
    pub items: Vec<ChecklistItem>,
    pub findings: Vec<Finding>,
    pub attachments: Vec<Attachment>,
    pub actions: Vec<Action>,
    pub departments: Vec<Department>,
}

impl ReportInputs {
    /// Fetch all collections, failing on the first collaborator error.
    ///
    /// A collection that comes back short is taken as the complete input.
    pub fn fetch(source: &dyn EntitySource, audit_id: &str) -> Result<Self, CollaboratorError> {
        let items = source.load_checklist_items(audit_id)?;
        let item_ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        let findings = source.load_findings(&item_ids)?;
        let finding_ids: Vec<&str> = findings.iter().map(|f| f.id.as_str()).collect();
        let attachments = source.load_attachments(&finding_ids)?;
        let actions = source.load_actions(&ActionQuery {
            finding_ids: finding_ids.iter().map(ToString::to_string).collect(),
            department_id: None,
        })?;
        let departments = source.load_departments()?;

        Ok(Self {
            items,
            findings,
            attachments,
            actions,
            departments,
        })
    }

    /// Fetch all collections, treating each failed fetch as "no data available".
    #[must_use]
    pub fn fetch_or_empty(source: &dyn EntitySource, audit_id: &str) -> Self {
        let items = or_empty("checklist items", source.load_checklist_items(audit_id));
        let item_ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        let findings = or_empty("findings", source.load_findings(&item_ids));
        let finding_ids: Vec<&str> = findings.iter().map(|f| f.id.as_str()).collect();
        let attachments = or_empty("attachments", source.load_attachments(&finding_ids));
        let actions = or_empty(
            "actions",
            source.load_actions(&ActionQuery {
                finding_ids: finding_ids.iter().map(ToString::to_string).collect(),
                department_id: None,
            }),
        );
        let departments = or_empty("departments", source.load_departments());

        Self {
            items,
            findings,
            attachments,
            actions,
            departments,
        }
    }
}

fn or_empty<T>(collection: &str, result: Result<Vec<T>, CollaboratorError>) -> Vec<T> {
    result.unwrap_or_else(|error| {
        tracing::warn!(collection, %error, "fetch failed; continuing without data");
        Vec::new()
    })
}

// ---------------------------------------------------------------------------
// Department names
// ---------------------------------------------------------------------------

pub trait DepartmentResolver {
    fn resolve_dept_name(&self, dept_id: &str) -> Option<String>;
}

impl<F> DepartmentResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve_dept_name(&self, dept_id: &str) -> Option<String> {
        self(dept_id)
    }
}

/// Resolved name, or the raw id when the resolver does not know it.
pub fn resolve_or_raw(resolver: &dyn DepartmentResolver, dept_id: &str) -> String {
    resolver
        .resolve_dept_name(dept_id)
        .unwrap_or_else(|| dept_id.to_string())
}

/// In-memory resolver built from `load_departments` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentDirectory {
    names: HashMap<String, String>,
}

impl DepartmentDirectory {
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FromIterator<&'a Department> for DepartmentDirectory {
    fn from_iter<I: IntoIterator<Item = &'a Department>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|d| (d.id.clone(), d.name.clone()))
                .collect(),
        }
    }
}

impl DepartmentResolver for DepartmentDirectory {
    fn resolve_dept_name(&self, dept_id: &str) -> Option<String> {
        self.names.get(dept_id).cloned()
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Turns an attachment's storage reference into a renderable URI or path.
/// Implementations must not read file contents.
pub trait StorageResolver {
    fn resolve_uri(&self, attachment: &Attachment) -> Result<String, CollaboratorError>;
}

// ---------------------------------------------------------------------------
// Approval / minutes events
// ---------------------------------------------------------------------------

/// External source of director approvals and kickoff minutes for a plan.
pub trait ApprovalSource {
    /// Approver id, once the director has approved.
    fn director_approval(&self, plan_id: &str) -> Result<Option<String>, CollaboratorError>;

    /// Reference to the recorded kickoff minutes, once uploaded.
    fn kickoff_minutes(&self, plan_id: &str) -> Result<Option<String>, CollaboratorError>;
}

/// Events the approval source has produced that the draft has not yet seen.
pub fn pending_events(
    source: &dyn ApprovalSource,
    plan_id: &str,
    draft: &PlanDraft,
) -> Result<Vec<PlanEvent>, CollaboratorError> {
    let mut events = Vec::new();
    let mut state = draft.state();

    if state == PlanState::Submitted {
        if let Some(approver) = source.director_approval(plan_id)? {
            events.push(PlanEvent::DirectorApprove { approver });
            state = PlanState::DirectorApproved;
        }
    }

    if state == PlanState::DirectorApproved {
        if let Some(minutes) = source.kickoff_minutes(plan_id)? {
            events.push(PlanEvent::RecordKickoff {
                minutes: Some(minutes),
            });
        }
    }

    Ok(events)
}

/// Pull pending approval events and apply them to the draft in order.
pub fn sync_external_events(
    draft: &mut PlanDraft,
    source: &dyn ApprovalSource,
    plan_id: &str,
    schedule: &ScheduleConfig,
) -> Result<PlanState, CoreError> {
    for event in pending_events(source, plan_id, draft)? {
        draft.apply(event, schedule)?;
    }
    Ok(draft.state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{department, item};
    use pretty_assertions::assert_eq;

    struct FlakySource {
        fail_findings: bool,
    }

    impl EntitySource for FlakySource {
        fn load_checklist_items(
            &self,
            audit_id: &str,
        ) -> Result<Vec<ChecklistItem>, CollaboratorError> {
            Ok(vec![item("itm-1", audit_id, Some("Safety"))])
        }

        fn load_findings(&self, _: &[&str]) -> Result<Vec<Finding>, CollaboratorError> {
            if self.fail_findings {
                Err(CollaboratorError::fetch("findings", "connection reset"))
            } else {
                Ok(Vec::new())
            }
        }

        fn load_attachments(&self, _: &[&str]) -> Result<Vec<Attachment>, CollaboratorError> {
            Ok(Vec::new())
        }

        fn load_actions(&self, _: &ActionQuery) -> Result<Vec<Action>, CollaboratorError> {
            Ok(Vec::new())
        }

        fn load_departments(&self) -> Result<Vec<Department>, CollaboratorError> {
            Ok(vec![department("dep-ops", "Operations")])
        }
    }

    #[test]
    fn fetch_propagates_collaborator_failure() {
        let source = FlakySource {
            fail_findings: true,
        };
        let err = ReportInputs::fetch(&source, "aud-1").unwrap_err();
        assert_eq!(err, CollaboratorError::fetch("findings", "connection reset"));
    }

    #[test]
    fn fetch_or_empty_keeps_what_loaded() {
        let source = FlakySource {
            fail_findings: true,
        };
        let inputs = ReportInputs::fetch_or_empty(&source, "aud-1");
        assert_eq!(inputs.items.len(), 1);
        assert!(inputs.findings.is_empty());
        assert_eq!(inputs.departments.len(), 1);
    }

    #[test]
    fn resolver_falls_back_to_raw_id() {
        let directory: DepartmentDirectory = [department("dep-1", "Finance")].iter().collect();
        assert_eq!(resolve_or_raw(&directory, "dep-1"), "Finance");
        assert_eq!(resolve_or_raw(&directory, "dep-2"), "dep-2");

        let closure = |id: &str| (id == "x").then(|| "Ops".to_string());
        assert_eq!(resolve_or_raw(&closure, "x"), "Ops");
        assert_eq!(resolve_or_raw(&closure, "y"), "y");
    }
}
