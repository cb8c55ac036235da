use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build the audit report from a JSON snapshot of records.
    Report(ReportArgs),
    /// Validate the five schedule milestones.
    Schedule(ScheduleArgs),
    /// Preview the sensitive-audit permission step.
    Permission(PermissionArgs),
    /// Classify an attachment as image or file.
    Classify(ClassifyArgs),
    /// Replay a plan event list through the planning workflow.
    Plan(PlanArgs),
    /// Filter and sort a user list.
    Users(UsersArgs),
    /// Print the JSON schema of a response type.
    Schema(SchemaArgs),
}

/// Arguments for `audt report`.
#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Snapshot file with `audit`, `items`, `findings`, `attachments`,
    /// `actions`, and `departments`.
    pub snapshot: PathBuf,
    /// Evaluation time (RFC 3339). Defaults to the current time.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
    /// Base URL or directory that document storage references resolve under.
    #[arg(long)]
    pub link_base: Option<String>,
}

/// Arguments for `audt schedule`.
#[derive(Clone, Debug, Args)]
pub struct ScheduleArgs {
    #[arg(long)]
    pub kickoff_meeting: Option<String>,
    #[arg(long)]
    pub fieldwork_start: Option<String>,
    #[arg(long)]
    pub evidence_due: Option<String>,
    #[arg(long)]
    pub draft_report_due: Option<String>,
    #[arg(long)]
    pub capa_due: Option<String>,
}

/// Arguments for `audt permission`.
#[derive(Clone, Debug, Args)]
pub struct PermissionArgs {
    /// The audit is flagged sensitive.
    #[arg(long)]
    pub sensitive: bool,
    /// Director approval has been recorded.
    #[arg(long)]
    pub approved: bool,
    /// Kickoff minutes have been recorded.
    #[arg(long)]
    pub minutes: bool,
}

/// Arguments for `audt classify`.
#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub content_type: Option<String>,
    #[arg(long)]
    pub file_name: Option<String>,
}

/// Arguments for `audt plan`.
#[derive(Clone, Debug, Args)]
pub struct PlanArgs {
    /// File with a plan `header` and an ordered `events` list.
    pub events: PathBuf,
    /// Audit id used when promoting a submitted plan.
    #[arg(long, default_value = "aud-preview")]
    pub audit_id: String,
}

/// Arguments for `audt users`.
#[derive(Clone, Debug, Args)]
pub struct UsersArgs {
    /// JSON array of user accounts.
    pub users: PathBuf,
    /// Role slug, or `all`.
    #[arg(long)]
    pub role: Option<String>,
    /// Case-insensitive match on name and email.
    #[arg(long)]
    pub search: Option<String>,
    /// Earliest creation date (inclusive, YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Latest creation date (inclusive, YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Newest first.
    #[arg(long)]
    pub desc: bool,
}

/// Arguments for `audt schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub type_name: String,
}
