use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ActionStatus;

/// A remediation action raised against a finding.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Action {
    pub id: String,
    pub finding_id: String,
    pub title: String,
    pub status: ActionStatus,
    pub department_id: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress: u8,
}

impl Action {
    /// `due_date < now` and the action is neither resolved nor closed.
    /// An action without a due date is never overdue.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_settled() && self.due_date.is_some_and(|due| due < now)
    }

    /// Progress clamped to `0..=100`.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.progress.min(100)
    }
}
