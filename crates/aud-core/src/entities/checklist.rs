use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A checklist question within one audit section.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub audit_id: String,
    /// Section label. Missing or blank labels group as unsectioned.
    pub section: Option<String>,
    /// External numbering (e.g. `"4.2.1"`).
    pub code: Option<String>,
    pub question: String,
}

impl ChecklistItem {
    /// Trimmed section label, `None` when absent or blank.
    #[must_use]
    pub fn section_label(&self) -> Option<&str> {
        self.section
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(section: Option<&str>) -> ChecklistItem {
        ChecklistItem {
            id: "itm-1".into(),
            audit_id: "aud-1".into(),
            section: section.map(String::from),
            code: None,
            question: "Is the fire exit clear?".into(),
        }
    }

    #[test]
    fn blank_section_has_no_label() {
        assert_eq!(item(None).section_label(), None);
        assert_eq!(item(Some("   ")).section_label(), None);
        assert_eq!(item(Some(" Safety ")).section_label(), Some("Safety"));
    }
}
