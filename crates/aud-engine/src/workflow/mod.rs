//! Audit-plan workflow: a pure `(state, event, context) → state` transition
//! function and the [`PlanDraft`] aggregate that records accepted events.
//!
//! ```text
//! draft ─assign_team→ team_assigned ─decide_sensitivity→ sensitivity_decided
//!   ─set_schedule→ schedule_set ─submit→ submitted ─director_approve→ director_approved
//!   ─record_kickoff→ kickoff_recorded ─activate→ active ─close→ closed
//! ```
//!
//! `cancel` moves any state except `closed`/`cancelled` to `cancelled`.
//! `attach_template` is the only self-loop and is accepted in `draft` only.

pub mod permission;
pub mod schedule;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use aud_config::ScheduleConfig;
use aud_core::entities::{AccessGrant, Audit};
use aud_core::enums::{AuditStatus, PermissionState, PlanState};
use aud_core::errors::ValidationErrors;

use self::permission::{derive_permission_state, issue_access_grants};
use self::schedule::{ScheduleDates, ScheduleInput, validate_schedule};

// ---------------------------------------------------------------------------
// Events and context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlanEvent {
    /// Template / DRL document reference from the first wizard step.
    AttachTemplate { reference: String },
    AssignTeam { auditors: Vec<String> },
    DecideSensitivity { sensitive: bool },
    SetSchedule { schedule: ScheduleInput },
    Submit,
    DirectorApprove { approver: String },
    /// Kickoff held. `minutes` references the uploaded kickoff minutes.
    RecordKickoff { minutes: Option<String> },
    Activate,
    Close,
    Cancel,
}

impl PlanEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AttachTemplate { .. } => "attach_template",
            Self::AssignTeam { .. } => "assign_team",
            Self::DecideSensitivity { .. } => "decide_sensitivity",
            Self::SetSchedule { .. } => "set_schedule",
            Self::Submit => "submit",
            Self::DirectorApprove { .. } => "director_approve",
            Self::RecordKickoff { .. } => "record_kickoff",
            Self::Activate => "activate",
            Self::Close => "close",
            Self::Cancel => "cancel",
        }
    }
}

/// Facts a guard may consult beyond the event payload.
#[derive(Debug, Clone, Copy)]
pub struct PlanContext<'a> {
    pub sensitive: bool,
    pub approval_recorded: bool,
    pub minutes_recorded: bool,
    pub schedule: &'a ScheduleConfig,
}

impl<'a> PlanContext<'a> {
    #[must_use]
    pub const fn new(schedule: &'a ScheduleConfig) -> Self {
        Self {
            sensitive: false,
            approval_recorded: false,
            minutes_recorded: false,
            schedule,
        }
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// Apply `event` to `state`.
///
/// Guard failures come back as field-keyed [`ValidationErrors`]; an event that
/// does not apply to the current state is keyed `state`. Director approval is
/// idempotent: once approved, approving again returns the same state.
pub fn transition(
    state: PlanState,
    event: &PlanEvent,
    ctx: &PlanContext<'_>,
) -> Result<PlanState, ValidationErrors> {
    use PlanEvent as E;
    use PlanState as S;

    let next = match (state, event) {
        (s, E::Cancel) if !s.is_terminal() => S::Cancelled,
        (S::Draft, E::AttachTemplate { reference }) => {
            if reference.trim().is_empty() {
                return Err(ValidationErrors::single(
                    "template",
                    "template reference must not be blank",
                ));
            }
            S::Draft
        }
        (S::Draft, E::AssignTeam { auditors }) => {
            if normalize_auditors(auditors).is_empty() {
                return Err(ValidationErrors::single(
                    "auditors",
                    "assign at least one auditor",
                ));
            }
            S::TeamAssigned
        }
        (S::TeamAssigned, E::DecideSensitivity { .. }) => S::SensitivityDecided,
        (S::SensitivityDecided, E::SetSchedule { schedule }) => {
            let validation = validate_schedule(schedule, ctx.schedule);
            if !validation.ok {
                return Err(validation.errors);
            }
            S::ScheduleSet
        }
        (S::ScheduleSet, E::Submit) => S::Submitted,
        (S::Submitted, E::DirectorApprove { approver }) => {
            if approver.trim().is_empty() {
                return Err(ValidationErrors::single("approver", "approver is required"));
            }
            S::DirectorApproved
        }
        (s, E::DirectorApprove { .. }) if s.is_approved() => s,
        (S::DirectorApproved, E::RecordKickoff { minutes }) => {
            let minutes_recorded =
                ctx.minutes_recorded || minutes.as_deref().is_some_and(|m| !m.trim().is_empty());
            if ctx.sensitive && !minutes_recorded {
                return Err(ValidationErrors::single(
                    "kickoffMinutes",
                    "sensitive audits require kickoff minutes before kickoff can be recorded",
                ));
            }
            S::KickoffRecorded
        }
        (S::KickoffRecorded, E::Activate) => S::Active,
        (S::Active, E::Close) => S::Closed,
        (s, e) => {
            return Err(ValidationErrors::single(
                "state",
                format!("cannot {} while plan is {s}", e.name()),
            ));
        }
    };

    debug_assert!(next == state || state.can_transition_to(next));
    tracing::debug!(from = %state, to = %next, event = event.name(), "plan transition");
    Ok(next)
}

/// Trimmed, non-blank, first-occurrence auditor ids.
fn normalize_auditors(auditors: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(auditors.len());
    for auditor in auditors.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
        if !normalized.iter().any(|existing| existing == auditor) {
            normalized.push(auditor.to_string());
        }
    }
    normalized
}

// ---------------------------------------------------------------------------
// PlanHeader / PlanDraft
// ---------------------------------------------------------------------------

/// Descriptive fields entered when the plan is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanHeader {
    pub title: String,
    pub audit_type: String,
    pub scope: Option<String>,
    pub objective: Option<String>,
}

/// In-memory aggregate of the planning wizard, owned by one authoring session.
///
/// Nothing is persisted before `Submitted`; dropping the draft is the whole
/// of cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanDraft {
    header: PlanHeader,
    state: PlanState,
    template: Option<String>,
    auditors: Vec<String>,
    sensitive: Option<bool>,
    schedule: Option<ScheduleDates>,
    approved_by: Option<String>,
    kickoff_minutes: Option<String>,
}

impl PlanDraft {
    #[must_use]
    pub const fn new(header: PlanHeader) -> Self {
        Self {
            header,
            state: PlanState::Draft,
            template: None,
            auditors: Vec::new(),
            sensitive: None,
            schedule: None,
            approved_by: None,
            kickoff_minutes: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PlanState {
        self.state
    }

    #[must_use]
    pub const fn header(&self) -> &PlanHeader {
        &self.header
    }

    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    #[must_use]
    pub fn auditors(&self) -> &[String] {
        &self.auditors
    }

    /// `false` until the sensitivity step has been answered.
    #[must_use]
    pub fn is_sensitive(&self) -> bool {
        self.sensitive.unwrap_or(false)
    }

    #[must_use]
    pub const fn schedule(&self) -> Option<&ScheduleDates> {
        self.schedule.as_ref()
    }

    #[must_use]
    pub fn approved_by(&self) -> Option<&str> {
        self.approved_by.as_deref()
    }

    #[must_use]
    pub fn kickoff_minutes(&self) -> Option<&str> {
        self.kickoff_minutes.as_deref()
    }

    #[must_use]
    pub fn context<'a>(&self, schedule: &'a ScheduleConfig) -> PlanContext<'a> {
        PlanContext {
            sensitive: self.is_sensitive(),
            approval_recorded: self.state.is_approved(),
            minutes_recorded: self.kickoff_minutes.is_some(),
            schedule,
        }
    }

    /// Permission step display state, derived from the recorded facts.
    #[must_use]
    pub fn permission_state(&self) -> PermissionState {
        derive_permission_state(
            self.is_sensitive(),
            self.state.is_approved(),
            self.kickoff_minutes.is_some(),
        )
    }

    /// Run `event` through [`transition`] and, if accepted, record its payload.
    /// A rejected event leaves the draft untouched.
    pub fn apply(
        &mut self,
        event: PlanEvent,
        schedule: &ScheduleConfig,
    ) -> Result<PlanState, ValidationErrors> {
        let next = transition(self.state, &event, &self.context(schedule))?;

        match event {
            PlanEvent::AttachTemplate { reference } => {
                self.template = Some(reference.trim().to_string());
            }
            PlanEvent::AssignTeam { auditors } => self.auditors = normalize_auditors(&auditors),
            PlanEvent::DecideSensitivity { sensitive } => self.sensitive = Some(sensitive),
            PlanEvent::SetSchedule { schedule: input } => {
                self.schedule = validate_schedule(&input, schedule).dates;
            }
            PlanEvent::DirectorApprove { approver } => {
                if self.approved_by.is_none() {
                    self.approved_by = Some(approver.trim().to_string());
                }
            }
            PlanEvent::RecordKickoff {
                minutes: Some(minutes),
            } if !minutes.trim().is_empty() => {
                self.kickoff_minutes = Some(minutes.trim().to_string());
            }
            PlanEvent::RecordKickoff { .. }
            | PlanEvent::Submit
            | PlanEvent::Activate
            | PlanEvent::Close
            | PlanEvent::Cancel => {}
        }

        self.state = next;
        Ok(next)
    }

    /// Issue access grants for the assigned team; see [`issue_access_grants`].
    ///
    /// A ready plan issues only after kickoff and before it is closed.
    pub fn issue_access_grants(
        &self,
        audit: &Audit,
        existing: &[AccessGrant],
        issued_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<AccessGrant>, ValidationErrors> {
        if self.permission_state() == PermissionState::ReadyToIssue && !self.state.allows_issuance()
        {
            return Err(ValidationErrors::single(
                "state",
                format!("cannot issue access grants while plan is {}", self.state),
            ));
        }
        issue_access_grants(
            audit,
            &self.auditors,
            existing,
            issued_by,
            now,
            self.permission_state(),
        )
    }

    /// Promote a submitted plan to an [`Audit`].
    pub fn to_audit(&self, id: &str) -> Result<Audit, ValidationErrors> {
        let status = match self.state {
            PlanState::Submitted | PlanState::DirectorApproved => AuditStatus::Planned,
            PlanState::KickoffRecorded => AuditStatus::Kickoff,
            PlanState::Active => AuditStatus::Fieldwork,
            PlanState::Closed => AuditStatus::Closed,
            state => {
                return Err(ValidationErrors::single(
                    "state",
                    format!("plan must be submitted before it becomes an audit (is {state})"),
                ));
            }
        };

        Ok(Audit {
            id: id.to_string(),
            title: self.header.title.clone(),
            audit_type: self.header.audit_type.clone(),
            scope: self.header.scope.clone(),
            status,
            start_date: self.schedule.map(|s| s.kickoff_meeting),
            end_date: self.schedule.map(|s| s.capa_due),
            objective: self.header.objective.clone(),
            sensitive: self.is_sensitive(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header() -> PlanHeader {
        PlanHeader {
            title: "Cold storage audit".into(),
            audit_type: "internal".into(),
            scope: Some("Cold chain".into()),
            objective: None,
        }
    }

    fn schedule_input() -> ScheduleInput {
        ScheduleInput {
            kickoff_meeting: Some("2024-01-05".into()),
            fieldwork_start: Some("2024-01-10".into()),
            evidence_due: Some("2024-01-20".into()),
            draft_report_due: Some("2024-02-01".into()),
            capa_due: Some("2024-03-01".into()),
        }
    }

    fn draft_at_submitted(sensitive: bool, config: &ScheduleConfig) -> PlanDraft {
        let mut draft = PlanDraft::new(header());
        for event in [
            PlanEvent::AttachTemplate {
                reference: "drl/cold-storage.xlsx".into(),
            },
            PlanEvent::AssignTeam {
                auditors: vec!["usr-a".into(), "usr-b".into()],
            },
            PlanEvent::DecideSensitivity { sensitive },
            PlanEvent::SetSchedule {
                schedule: schedule_input(),
            },
            PlanEvent::Submit,
        ] {
            draft.apply(event, config).unwrap();
        }
        draft
    }

    #[test]
    fn happy_path_reaches_closed() {
        let config = ScheduleConfig::default();
        let mut draft = draft_at_submitted(false, &config);
        assert_eq!(draft.state(), PlanState::Submitted);
        assert_eq!(draft.template(), Some("drl/cold-storage.xlsx"));

        for (event, expected) in [
            (
                PlanEvent::DirectorApprove {
                    approver: "usr-director".into(),
                },
                PlanState::DirectorApproved,
            ),
            (
                PlanEvent::RecordKickoff { minutes: None },
                PlanState::KickoffRecorded,
            ),
            (PlanEvent::Activate, PlanState::Active),
            (PlanEvent::Close, PlanState::Closed),
        ] {
            assert_eq!(draft.apply(event, &config), Ok(expected));
        }
        assert_eq!(draft.permission_state(), PermissionState::NotRequired);
    }

    #[test]
    fn team_requires_an_auditor() {
        let config = ScheduleConfig::default();
        let ctx = PlanContext::new(&config);
        let err = transition(
            PlanState::Draft,
            &PlanEvent::AssignTeam {
                auditors: vec!["  ".into()],
            },
            &ctx,
        )
        .unwrap_err();
        assert_eq!(err.get("auditors"), Some("assign at least one auditor"));
    }

    #[test]
    fn schedule_errors_surface_per_field() {
        let config = ScheduleConfig::default();
        let ctx = PlanContext::new(&config);
        let mut input = schedule_input();
        input.kickoff_meeting = Some("2024-01-10".into());
        input.fieldwork_start = Some("2024-01-05".into());
        input.capa_due = None;

        let err = transition(
            PlanState::SensitivityDecided,
            &PlanEvent::SetSchedule { schedule: input },
            &ctx,
        )
        .unwrap_err();
        assert!(err.contains("fieldworkStart"));
        assert!(err.contains("capaDue"));
    }

    #[test]
    fn approval_is_idempotent() {
        let config = ScheduleConfig::default();
        let ctx = PlanContext::new(&config);
        let approve = PlanEvent::DirectorApprove {
            approver: "usr-director".into(),
        };
        for state in [
            PlanState::DirectorApproved,
            PlanState::KickoffRecorded,
            PlanState::Active,
            PlanState::Closed,
        ] {
            assert_eq!(transition(state, &approve, &ctx), Ok(state));
        }

        let mut draft = draft_at_submitted(false, &config);
        draft.apply(approve.clone(), &config).unwrap();
        let again = draft.apply(
            PlanEvent::DirectorApprove {
                approver: "usr-other".into(),
            },
            &config,
        );
        assert_eq!(again, Ok(PlanState::DirectorApproved));
        assert_eq!(draft.approved_by(), Some("usr-director"));
    }

    #[test]
    fn sensitive_kickoff_requires_minutes() {
        let config = ScheduleConfig::default();
        let mut draft = draft_at_submitted(true, &config);
        draft
            .apply(
                PlanEvent::DirectorApprove {
                    approver: "usr-director".into(),
                },
                &config,
            )
            .unwrap();
        assert_eq!(
            draft.permission_state(),
            PermissionState::PendingApprovalOrMinutes
        );

        let err = draft
            .apply(PlanEvent::RecordKickoff { minutes: None }, &config)
            .unwrap_err();
        assert!(err.contains("kickoffMinutes"));
        assert_eq!(draft.state(), PlanState::DirectorApproved);

        let next = draft.apply(
            PlanEvent::RecordKickoff {
                minutes: Some("minutes/kickoff.pdf".into()),
            },
            &config,
        );
        assert_eq!(next, Ok(PlanState::KickoffRecorded));
        assert_eq!(draft.permission_state(), PermissionState::ReadyToIssue);
    }

    #[test]
    fn cancel_from_any_non_terminal_state() {
        let config = ScheduleConfig::default();
        let ctx = PlanContext::new(&config);
        assert_eq!(
            transition(PlanState::ScheduleSet, &PlanEvent::Cancel, &ctx),
            Ok(PlanState::Cancelled)
        );
        assert_eq!(
            transition(PlanState::Active, &PlanEvent::Cancel, &ctx),
            Ok(PlanState::Cancelled)
        );
        assert!(transition(PlanState::Closed, &PlanEvent::Cancel, &ctx).is_err());
        assert!(transition(PlanState::Cancelled, &PlanEvent::Cancel, &ctx).is_err());
    }

    #[test]
    fn out_of_order_event_is_keyed_to_state() {
        let config = ScheduleConfig::default();
        let ctx = PlanContext::new(&config);
        let err = transition(PlanState::Draft, &PlanEvent::Submit, &ctx).unwrap_err();
        assert_eq!(err.get("state"), Some("cannot submit while plan is draft"));
    }

    #[test]
    fn rejected_event_leaves_draft_untouched() {
        let config = ScheduleConfig::default();
        let mut draft = PlanDraft::new(header());
        let before = draft.clone();
        assert!(
            draft
                .apply(PlanEvent::AssignTeam { auditors: vec![] }, &config)
                .is_err()
        );
        assert_eq!(draft, before);
    }

    #[test]
    fn to_audit_requires_submission() {
        let config = ScheduleConfig::default();
        let draft = PlanDraft::new(header());
        assert!(draft.to_audit("aud-1").unwrap_err().contains("state"));

        let draft = draft_at_submitted(true, &config);
        let audit = draft.to_audit("aud-1").unwrap();
        assert_eq!(audit.status, AuditStatus::Planned);
        assert!(audit.sensitive);
        assert_eq!(audit.start_date.map(|d| d.to_string()), Some("2024-01-05".into()));
        assert_eq!(audit.end_date.map(|d| d.to_string()), Some("2024-03-01".into()));
    }

    #[test]
    fn auditors_are_deduplicated() {
        let config = ScheduleConfig::default();
        let mut draft = PlanDraft::new(header());
        draft
            .apply(
                PlanEvent::AssignTeam {
                    auditors: vec!["usr-a".into(), " usr-a".into(), "usr-b".into()],
                },
                &config,
            )
            .unwrap();
        assert_eq!(draft.auditors(), &["usr-a".to_string(), "usr-b".to_string()]);
    }

    #[test]
    fn closed_plan_no_longer_issues_grants() {
        let config = ScheduleConfig::default();
        let mut draft = draft_at_submitted(true, &config);
        for event in [
            PlanEvent::DirectorApprove {
                approver: "usr-director".into(),
            },
            PlanEvent::RecordKickoff {
                minutes: Some("minutes/kickoff.pdf".into()),
            },
        ] {
            draft.apply(event, &config).unwrap();
        }
        let now = Utc::now();
        let live = draft.to_audit("aud-7").unwrap();
        assert_eq!(
            draft
                .issue_access_grants(&live, &[], "usr-staff", now)
                .map(|grants| grants.len()),
            Ok(2)
        );

        draft.apply(PlanEvent::Activate, &config).unwrap();
        draft.apply(PlanEvent::Close, &config).unwrap();
        let closed = draft.to_audit("aud-7").unwrap();
        assert_eq!(draft.permission_state(), PermissionState::ReadyToIssue);
        let err = draft
            .issue_access_grants(&closed, &[], "usr-staff", now)
            .unwrap_err();
        assert_eq!(
            err.get("state"),
            Some("cannot issue access grants while plan is closed")
        );
    }
}
