use aud_config::AuditConfig;
use aud_core::entities::{Action, Attachment, Audit, ChecklistItem, Department, Finding};
use aud_core::errors::CollaboratorError;
use aud_engine::collaborators::{ReportInputs, StorageResolver};
use aud_engine::{build_report_from, resolve_links};
use chrono::Utc;
use serde::Deserialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::commands::shared::input::read_json;
use crate::output::output;

/// On-disk record snapshot for one audit.
#[derive(Debug, Deserialize)]
struct ReportSnapshot {
    audit: Audit,
    #[serde(default)]
    items: Vec<ChecklistItem>,
    #[serde(default)]
    findings: Vec<Finding>,
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    actions: Vec<Action>,
    #[serde(default)]
    departments: Vec<Department>,
}

impl ReportSnapshot {
    fn split(self) -> (Audit, ReportInputs) {
        let inputs = ReportInputs {
            items: self.items,
            findings: self.findings,
            attachments: self.attachments,
            actions: self.actions,
            departments: self.departments,
        };
        (self.audit, inputs)
    }
}

/// Joins storage references onto a base URL or directory.
struct BaseStorage<'a> {
    base: &'a str,
}

impl StorageResolver for BaseStorage<'_> {
    fn resolve_uri(&self, attachment: &Attachment) -> Result<String, CollaboratorError> {
        let reference = attachment.storage_ref.trim().trim_start_matches('/');
        if reference.is_empty() {
            return Err(CollaboratorError::Storage {
                reference: attachment.storage_ref.clone(),
                reason: "empty storage reference".to_string(),
            });
        }
        Ok(format!("{}/{reference}", self.base.trim_end_matches('/')))
    }
}

/// Handle `audt report`.
pub fn handle(args: &ReportArgs, config: &AuditConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot: ReportSnapshot = read_json(&args.snapshot, "snapshot")?;
    let (audit, inputs) = snapshot.split();
    let now = args.now.unwrap_or_else(Utc::now);

    let mut report = build_report_from(&audit, &inputs, now, &config.report);
    if let Some(base) = args.link_base.as_deref() {
        let failed = resolve_links(&mut report, &BaseStorage { base });
        if failed > 0 {
            tracing::warn!(failed, "some document links could not be resolved");
        }
    }

    output(&report, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SNAPSHOT: &str = r#"{
        "audit": {
            "id": "aud-1", "title": "Plant audit", "audit_type": "internal",
            "scope": null, "status": "fieldwork", "start_date": null,
            "end_date": null, "objective": null
        },
        "items": [
            {"id": "itm-1", "audit_id": "aud-1", "section": "Safety", "code": null, "question": "Exits clear?"}
        ],
        "attachments": [
            {"id": "doc-1", "finding_id": null, "audit_id": "aud-1", "title": "Plan",
             "content_type": null, "file_name": "plan.pdf", "storage_ref": "/plans/aud-1.pdf"}
        ]
    }"#;

    #[test]
    fn snapshot_defaults_missing_collections() {
        let snapshot: ReportSnapshot = serde_json::from_str(SNAPSHOT).expect("snapshot parses");
        let (audit, inputs) = snapshot.split();
        assert_eq!(audit.id, "aud-1");
        assert!(!audit.sensitive);
        assert_eq!(inputs.items.len(), 1);
        assert!(inputs.findings.is_empty());
        assert!(inputs.actions.is_empty());
    }

    #[test]
    fn base_storage_joins_references() {
        let snapshot: ReportSnapshot = serde_json::from_str(SNAPSHOT).expect("snapshot parses");
        let storage = BaseStorage {
            base: "https://files.example.com/",
        };
        assert_eq!(
            storage.resolve_uri(&snapshot.attachments[0]),
            Ok("https://files.example.com/plans/aud-1.pdf".to_string())
        );

        let mut blank = snapshot.attachments[0].clone();
        blank.storage_ref = " ".into();
        assert!(storage.resolve_uri(&blank).is_err());
    }
}
