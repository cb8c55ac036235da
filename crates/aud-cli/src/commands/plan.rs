use aud_config::{AuditConfig, ScheduleConfig};
use aud_core::entities::{AccessGrant, Audit};
use aud_core::enums::PlanState;
use aud_core::errors::ValidationErrors;
use aud_core::responses::PermissionPreview;
use aud_engine::workflow::{PlanDraft, PlanEvent, PlanHeader};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PlanArgs;
use crate::commands::shared::input::read_json;
use crate::output::output;

/// Event script replayed by `audt plan`.
#[derive(Debug, Deserialize)]
struct PlanScript {
    header: PlanHeader,
    events: Vec<PlanEvent>,
    /// When set, grants are issued for the team as this staff member.
    #[serde(default)]
    issued_by: Option<String>,
    #[serde(default)]
    existing_grants: Vec<AccessGrant>,
}

#[derive(Debug, Serialize)]
struct RejectedEvent {
    index: usize,
    event: &'static str,
    errors: ValidationErrors,
}

#[derive(Debug, Serialize)]
struct PlanReplayResponse {
    state: PlanState,
    permission: PermissionPreview,
    applied: usize,
    rejected: Option<RejectedEvent>,
    audit: Option<Audit>,
    grants: Vec<AccessGrant>,
    grant_errors: Option<ValidationErrors>,
    draft: PlanDraft,
}

/// Handle `audt plan`.
pub fn handle(args: &PlanArgs, config: &AuditConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let script: PlanScript = read_json(&args.events, "plan events")?;
    let response = replay(script, &args.audit_id, &config.schedule, Utc::now());
    output(&response, flags.format)
}

/// Apply events in order, stopping at the first rejection.
fn replay(
    script: PlanScript,
    audit_id: &str,
    schedule: &ScheduleConfig,
    now: DateTime<Utc>,
) -> PlanReplayResponse {
    let mut draft = PlanDraft::new(script.header);
    let mut applied = 0;
    let mut rejected = None;

    for (index, event) in script.events.into_iter().enumerate() {
        let name = event.name();
        match draft.apply(event, schedule) {
            Ok(_) => applied += 1,
            Err(errors) => {
                tracing::info!(index, event = name, %errors, "plan event rejected");
                rejected = Some(RejectedEvent {
                    index,
                    event: name,
                    errors,
                });
                break;
            }
        }
    }

    let audit = draft.to_audit(audit_id).ok();

    let mut grants = Vec::new();
    let mut grant_errors = None;
    if let (Some(issuer), Some(audit)) = (script.issued_by.as_deref(), audit.as_ref()) {
        match draft.issue_access_grants(audit, &script.existing_grants, issuer, now) {
            Ok(issued) => grants = issued,
            Err(errors) => grant_errors = Some(errors),
        }
    }

    PlanReplayResponse {
        state: draft.state(),
        permission: draft.permission_state().into(),
        applied,
        rejected,
        audit,
        grants,
        grant_errors,
        draft,
    }
}

#[cfg(test)]
mod tests {
    use aud_core::enums::PermissionState;
    use pretty_assertions::assert_eq;

    use super::*;

    fn script(events: &str, issued_by: Option<&str>) -> PlanScript {
        let issued_by = issued_by.map_or_else(|| "null".to_string(), |s| format!("\"{s}\""));
        let json = format!(
            r#"{{
                "header": {{"title": "Vendor audit", "audit_type": "external", "scope": null, "objective": null}},
                "events": {events},
                "issued_by": {issued_by}
            }}"#
        );
        serde_json::from_str(&json).expect("script parses")
    }

    const TO_SUBMITTED: &str = r#"[
        {"event": "attach_template", "reference": "drl/vendor.xlsx"},
        {"event": "assign_team", "auditors": ["usr-a", "usr-b"]},
        {"event": "decide_sensitivity", "sensitive": true},
        {"event": "set_schedule", "schedule": {
            "kickoffMeeting": "2024-07-01", "fieldworkStart": "2024-07-08",
            "evidenceDue": "2024-07-19", "draftReportDue": "2024-08-02", "capaDue": "2024-09-02"
        }},
        {"event": "submit"},
        {"event": "director_approve", "approver": "usr-director"},
        {"event": "record_kickoff", "minutes": "minutes/vendor.pdf"}
    ]"#;

    #[test]
    fn full_replay_issues_grants() {
        let response = replay(
            script(TO_SUBMITTED, Some("usr-staff")),
            "aud-5",
            &ScheduleConfig::default(),
            Utc::now(),
        );
        assert_eq!(response.state, PlanState::KickoffRecorded);
        assert_eq!(response.applied, 7);
        assert!(response.rejected.is_none());
        assert_eq!(response.permission.state, PermissionState::ReadyToIssue);
        assert_eq!(response.grants.len(), 2);
        assert_eq!(response.audit.map(|a| a.id), Some("aud-5".to_string()));
    }

    #[test]
    fn replay_stops_at_first_rejection() {
        let events = r#"[
            {"event": "assign_team", "auditors": ["usr-a"]},
            {"event": "submit"},
            {"event": "decide_sensitivity", "sensitive": false}
        ]"#;
        let response = replay(
            script(events, Some("usr-staff")),
            "aud-5",
            &ScheduleConfig::default(),
            Utc::now(),
        );
        assert_eq!(response.state, PlanState::TeamAssigned);
        assert_eq!(response.applied, 1);
        let rejected = response.rejected.expect("submit should be rejected");
        assert_eq!(rejected.index, 1);
        assert_eq!(rejected.event, "submit");
        assert!(rejected.errors.contains("state"));
        assert!(response.audit.is_none());
        assert!(response.grants.is_empty());
    }
}
