//! Report façade: hierarchy plus compliance aggregates in one call.

use chrono::{DateTime, Utc};

use aud_config::ReportConfig;
use aud_core::entities::{Action, Attachment, Audit, ChecklistItem, Finding};
use aud_core::responses::Report;

use crate::collaborators::{DepartmentDirectory, DepartmentResolver, ReportInputs, StorageResolver};
use crate::compliance::{department_rollup, overdue_actions, severity_breakdown};
use crate::hierarchy::build_hierarchy;

/// Build the full report for `audit` at `now`.
///
/// Pure: the same inputs and `now` always give the same report. Document
/// URIs are left unset; see [`resolve_links`].
#[allow(clippy::too_many_arguments)]
pub fn build_report(
    audit: &Audit,
    items: &[ChecklistItem],
    findings: &[Finding],
    attachments: &[Attachment],
    actions: &[Action],
    now: DateTime<Utc>,
    resolver: &dyn DepartmentResolver,
    options: &ReportConfig,
) -> Report {
    let hierarchy = build_hierarchy(audit, items, findings, attachments, &options.unsectioned_label);

    let overdue = overdue_actions(
        &hierarchy,
        actions,
        now,
        resolver,
        &options.unassigned_department_label,
    );
    let dept_rollup = department_rollup(&overdue);
    let severity = severity_breakdown(&hierarchy);
    let sections = hierarchy.to_sections(now);
    let audit_documents = hierarchy.audit_documents();

    Report {
        audit: audit.clone(),
        generated_at: now,
        sections,
        audit_documents,
        overdue_actions: overdue,
        dept_rollup,
        severity_breakdown: severity,
        warnings: hierarchy.into_warnings(),
    }
}

/// [`build_report`] over fetched inputs, resolving departments from
/// `inputs.departments`.
#[must_use]
pub fn build_report_from(
    audit: &Audit,
    inputs: &ReportInputs,
    now: DateTime<Utc>,
    options: &ReportConfig,
) -> Report {
    let directory: DepartmentDirectory = inputs.departments.iter().collect();
    build_report(
        audit,
        &inputs.items,
        &inputs.findings,
        &inputs.attachments,
        &inputs.actions,
        now,
        &directory,
        options,
    )
}

/// Fill in document URIs through `storage`. Returns how many failed; failed
/// documents keep `uri: None`.
pub fn resolve_links(report: &mut Report, storage: &dyn StorageResolver) -> usize {
    let mut failed = 0;
    for document in report.documents_mut() {
        match storage.resolve_uri(&document.attachment) {
            Ok(uri) => document.uri = Some(uri),
            Err(error) => {
                tracing::warn!(
                    attachment = %document.attachment.id,
                    reference = %document.attachment.storage_ref,
                    %error,
                    "report: could not resolve document link"
                );
                failed += 1;
            }
        }
    }
    failed
}
