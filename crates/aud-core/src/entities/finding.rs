use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FindingState, FindingStatus, Severity};

/// A recorded nonconformity or observation tied to a checklist item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Finding {
    pub id: String,
    pub audit_id: String,
    pub audit_item_id: String,
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
    pub state: FindingState,
    pub deadline: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub root_cause_id: Option<String>,
    pub department_id: Option<String>,
    pub reviewer_id: Option<String>,
    /// Note on where the finding originated when raised outside the audit team.
    pub external_source: Option<String>,
}

impl Finding {
    /// Displayed status at `now`: an unresolved finding past its deadline is overdue.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> FindingStatus {
        match (self.state, self.deadline) {
            (FindingState::Resolved, _) => FindingStatus::Resolved,
            (_, Some(deadline)) if deadline < now => FindingStatus::Overdue,
            (state, _) => state.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn finding(state: FindingState, deadline: Option<DateTime<Utc>>) -> Finding {
        Finding {
            id: "fnd-1".into(),
            audit_id: "aud-1".into(),
            audit_item_id: "itm-1".into(),
            title: "Blocked exit".into(),
            description: None,
            severity: Severity::High,
            state,
            deadline,
            created_by: None,
            root_cause_id: None,
            department_id: None,
            reviewer_id: None,
            external_source: None,
        }
    }

    #[test]
    fn past_deadline_is_overdue_unless_resolved() {
        let now = Utc::now();
        let yesterday = Some(now - Duration::days(1));
        assert_eq!(
            finding(FindingState::InProgress, yesterday).status_at(now),
            FindingStatus::Overdue
        );
        assert_eq!(
            finding(FindingState::Resolved, yesterday).status_at(now),
            FindingStatus::Resolved
        );
    }

    #[test]
    fn deadline_equal_to_now_is_not_overdue() {
        let now = Utc::now();
        assert_eq!(
            finding(FindingState::Open, Some(now)).status_at(now),
            FindingStatus::Open
        );
        assert_eq!(
            finding(FindingState::InProgress, None).status_at(now),
            FindingStatus::InProgress
        );
    }
}
