use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AuditStatus;

/// A compliance review engagement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Audit {
    pub id: String,
    pub title: String,
    pub audit_type: String,
    pub scope: Option<String>,
    pub status: AuditStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub objective: Option<String>,
    /// Requires access permission issuance before fieldwork.
    #[serde(default)]
    pub sensitive: bool,
}
