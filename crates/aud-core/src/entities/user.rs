use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A staff account as listed on the user management screen.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role slug, e.g. `"auditor"`, `"director"`, `"department_head"`.
    pub role: String,
    pub department_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
