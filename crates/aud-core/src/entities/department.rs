use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An organisational unit that owns remediation actions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Department {
    pub id: String,
    pub name: String,
}
