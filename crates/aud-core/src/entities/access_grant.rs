use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{PREFIX_GRANT, format_id};

/// Site access permission (QR) issued to one auditor for one sensitive audit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AccessGrant {
    pub id: String,
    pub audit_id: String,
    pub auditor_id: String,
    pub issued_by: String,
    pub issued_at: DateTime<Utc>,
}

impl AccessGrant {
    /// Build a grant whose id is derived from `(audit_id, auditor_id)`, so at
    /// most one grant exists per auditor per audit.
    #[must_use]
    pub fn new(audit_id: &str, auditor_id: &str, issued_by: &str, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: format_id(PREFIX_GRANT, &format!("{audit_id}-{auditor_id}")),
            audit_id: audit_id.to_string(),
            auditor_id: auditor_id.to_string(),
            issued_by: issued_by.to_string(),
            issued_at,
        }
    }
}
