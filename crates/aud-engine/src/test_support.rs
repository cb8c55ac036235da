//! Record builders shared by the unit tests.

use aud_core::entities::{Action, Attachment, Audit, ChecklistItem, Department, Finding};
use aud_core::enums::{ActionStatus, AuditStatus, FindingState, Severity};

pub fn audit(id: &str) -> Audit {
    Audit {
        id: id.to_string(),
        title: "Warehouse compliance audit".to_string(),
        audit_type: "internal".to_string(),
        scope: None,
        status: AuditStatus::Fieldwork,
        start_date: None,
        end_date: None,
        objective: None,
        sensitive: false,
    }
}

pub fn item(id: &str, audit_id: &str, section: Option<&str>) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        audit_id: audit_id.to_string(),
        section: section.map(String::from),
        code: None,
        question: format!("Question for {id}"),
    }
}

pub fn finding(id: &str, audit_id: &str, audit_item_id: &str) -> Finding {
    Finding {
        id: id.to_string(),
        audit_id: audit_id.to_string(),
        audit_item_id: audit_item_id.to_string(),
        title: format!("Finding {id}"),
        description: None,
        severity: Severity::Medium,
        state: FindingState::Open,
        deadline: None,
        created_by: None,
        root_cause_id: None,
        department_id: None,
        reviewer_id: None,
        external_source: None,
    }
}

pub fn attachment(
    id: &str,
    finding_id: Option<&str>,
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Attachment {
    Attachment {
        id: id.to_string(),
        finding_id: finding_id.map(String::from),
        audit_id: None,
        title: format!("Document {id}"),
        content_type: content_type.map(String::from),
        file_name: file_name.map(String::from),
        storage_ref: format!("evidence/{id}"),
        is_final: false,
    }
}

pub fn action(id: &str, finding_id: &str, status: ActionStatus) -> Action {
    Action {
        id: id.to_string(),
        finding_id: finding_id.to_string(),
        title: format!("Action {id}"),
        status,
        department_id: None,
        due_date: None,
        progress: 0,
    }
}

pub fn department(id: &str, name: &str) -> Department {
    Department {
        id: id.to_string(),
        name: name.to_string(),
    }
}
