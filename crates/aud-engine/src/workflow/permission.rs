//! Sensitive-audit access permission (QR) sub-workflow.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use aud_core::entities::{AccessGrant, Audit};
use aud_core::enums::PermissionState;
use aud_core::errors::ValidationErrors;

/// Derive the permission step's display state.
///
/// | sensitive | approval | minutes | state |
/// |-----------|----------|---------|-------|
/// | false     | *        | *       | `NotRequired` |
/// | true      | false    | *       | `PendingApprovalOrMinutes` |
/// | true      | true     | false   | `PendingApprovalOrMinutes` |
/// | true      | true     | true    | `ReadyToIssue` |
#[must_use]
pub const fn derive_permission_state(
    sensitive: bool,
    approval_recorded: bool,
    minutes_recorded: bool,
) -> PermissionState {
    match (sensitive, approval_recorded, minutes_recorded) {
        (false, _, _) => PermissionState::NotRequired,
        (true, true, true) => PermissionState::ReadyToIssue,
        (true, _, _) => PermissionState::PendingApprovalOrMinutes,
    }
}

/// Issue one grant per listed auditor who does not already hold one for
/// this audit.
///
/// Issuance is an explicit staff action, allowed only in `ReadyToIssue` and
/// only for sensitive audits. Blank and repeated auditor ids are skipped.
pub fn issue_access_grants(
    audit: &Audit,
    auditors: &[String],
    existing: &[AccessGrant],
    issued_by: &str,
    now: DateTime<Utc>,
    permission: PermissionState,
) -> Result<Vec<AccessGrant>, ValidationErrors> {
    let reason = match (audit.sensitive, permission) {
        (false, _) | (_, PermissionState::NotRequired) => {
            Some("audit is not sensitive; no permission/QR issuance required")
        }
        (true, PermissionState::PendingApprovalOrMinutes) => {
            Some("issue after director approval and kickoff minutes are recorded")
        }
        (true, PermissionState::ReadyToIssue) => None,
    };
    if let Some(reason) = reason {
        return Err(ValidationErrors::single("permission", reason));
    }
    if issued_by.trim().is_empty() {
        return Err(ValidationErrors::single("issuedBy", "issuer is required"));
    }

    let mut granted: HashSet<&str> = existing
        .iter()
        .filter(|g| g.audit_id == audit.id)
        .map(|g| g.auditor_id.as_str())
        .collect();

    let grants: Vec<AccessGrant> = auditors
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .filter(|a| granted.insert(*a))
        .map(|auditor| AccessGrant::new(&audit.id, auditor, issued_by, now))
        .collect();

    tracing::debug!(audit = %audit.id, issued = grants.len(), "access grants issued");
    Ok(grants)
}
