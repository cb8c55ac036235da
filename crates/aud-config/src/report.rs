//! Report assembly labels.

use serde::{Deserialize, Serialize};

fn default_unsectioned_label() -> String {
    "Unsectioned".to_string()
}

fn default_unassigned_department_label() -> String {
    "Unassigned".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Group name for checklist items with no section label. Always sorts last.
    #[serde(default = "default_unsectioned_label")]
    pub unsectioned_label: String,

    /// Department name used when an overdue action has no department at all.
    #[serde(default = "default_unassigned_department_label")]
    pub unassigned_department_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            unsectioned_label: default_unsectioned_label(),
            unassigned_department_label: default_unassigned_department_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReportConfig::default();
        assert_eq!(config.unsectioned_label, "Unsectioned");
        assert_eq!(config.unassigned_department_label, "Unassigned");
    }
}
