use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An evidence document attached to a finding, or to the audit itself when
/// `finding_id` is absent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Attachment {
    pub id: String,
    pub finding_id: Option<String>,
    pub audit_id: Option<String>,
    pub title: String,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    /// Opaque reference handed to the storage resolver.
    pub storage_ref: String,
    #[serde(default)]
    pub is_final: bool,
}
