//! Status enums, severities, and derived display states for Auditrail.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! [`PlanState`] carries the planning wizard's transition table.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AuditStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a persisted audit.
///
/// ```text
/// draft → planned → kickoff → fieldwork → evidence_review → draft_report → capa → closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Draft,
    Planned,
    Kickoff,
    Fieldwork,
    EvidenceReview,
    DraftReport,
    Capa,
    Closed,
}

impl AuditStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Planned => "planned",
            Self::Kickoff => "kickoff",
            Self::Fieldwork => "fieldwork",
            Self::EvidenceReview => "evidence_review",
            Self::DraftReport => "draft_report",
            Self::Capa => "capa",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Finding severity. Variant order is the severity order: `Low < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const DESCENDING: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FindingState / FindingStatus
// ---------------------------------------------------------------------------

/// Stored remediation state of a finding.
///
/// ```text
/// open → in_progress → resolved
///      ↘──────────────↗
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FindingState {
    Open,
    InProgress,
    Resolved,
}

impl FindingState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for FindingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Displayed finding status. Never stored: see `Finding::status_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    Open,
    InProgress,
    Resolved,
    Overdue,
}

impl FindingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Overdue => "overdue",
        }
    }
}

impl From<FindingState> for FindingStatus {
    fn from(state: FindingState) -> Self {
        match state {
            FindingState::Open => Self::Open,
            FindingState::InProgress => Self::InProgress,
            FindingState::Resolved => Self::Resolved,
        }
    }
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionStatus
// ---------------------------------------------------------------------------

/// Status of a remediation action.
///
/// ```text
/// open → in_progress → resolved → closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl ActionStatus {
    /// Whether the action no longer counts toward overdue remediation.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PlanState
// ---------------------------------------------------------------------------

/// State of an audit plan draft in the planning wizard.
///
/// ```text
/// draft → team_assigned → sensitivity_decided → schedule_set → submitted
///       → director_approved → kickoff_recorded → active → closed
///
/// any non-terminal state → cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanState {
    Draft,
    TeamAssigned,
    SensitivityDecided,
    ScheduleSet,
    Submitted,
    DirectorApproved,
    KickoffRecorded,
    Active,
    Closed,
    Cancelled,
}

impl PlanState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::TeamAssigned, Self::Cancelled],
            Self::TeamAssigned => &[Self::SensitivityDecided, Self::Cancelled],
            Self::SensitivityDecided => &[Self::ScheduleSet, Self::Cancelled],
            Self::ScheduleSet => &[Self::Submitted, Self::Cancelled],
            Self::Submitted => &[Self::DirectorApproved, Self::Cancelled],
            Self::DirectorApproved => &[Self::KickoffRecorded, Self::Cancelled],
            Self::KickoffRecorded => &[Self::Active, Self::Cancelled],
            Self::Active => &[Self::Closed, Self::Cancelled],
            Self::Closed | Self::Cancelled => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled)
    }

    /// Director approval has been recorded at or before this state.
    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(
            self,
            Self::DirectorApproved | Self::KickoffRecorded | Self::Active | Self::Closed
        )
    }

    /// Access grants may only be issued while the audit is live.
    #[must_use]
    pub const fn allows_issuance(self) -> bool {
        matches!(self, Self::KickoffRecorded | Self::Active)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::TeamAssigned => "team_assigned",
            Self::SensitivityDecided => "sensitivity_decided",
            Self::ScheduleSet => "schedule_set",
            Self::Submitted => "submitted",
            Self::DirectorApproved => "director_approved",
            Self::KickoffRecorded => "kickoff_recorded",
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PermissionState
// ---------------------------------------------------------------------------

/// Access permission (QR) issuance state for an audit plan.
///
/// Always computed from `{sensitive, approval_recorded, minutes_recorded}`;
/// there is no way to set it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    NotRequired,
    PendingApprovalOrMinutes,
    ReadyToIssue,
}

impl PermissionState {
    /// Preview text shown on the permission step.
    #[must_use]
    pub const fn display_message(self) -> &'static str {
        match self {
            Self::NotRequired => "No permission/QR issuance required",
            Self::PendingApprovalOrMinutes => "Sensitive flag ON: issue after approval + minutes",
            Self::ReadyToIssue => "Ready to issue permission/QR",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotRequired => "not_required",
            Self::PendingApprovalOrMinutes => "pending_approval_or_minutes",
            Self::ReadyToIssue => "ready_to_issue",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// Rendering class of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Image,
    File,
}

impl DocumentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::File => "file",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
