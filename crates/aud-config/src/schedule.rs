//! Schedule validation messages.
//!
//! Templates use `{field}` and `{previous}` placeholders, substituted with the
//! display label of the offending field and of the field it must not precede.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_required() -> String {
    "{field} is required".to_string()
}

fn default_invalid_date() -> String {
    "{field} must be a valid date (YYYY-MM-DD)".to_string()
}

fn default_out_of_order() -> String {
    "{field} must not be earlier than {previous}".to_string()
}

fn default_field_labels() -> BTreeMap<String, String> {
    [
        ("kickoffMeeting", "Kickoff meeting"),
        ("fieldworkStart", "Fieldwork start"),
        ("evidenceDue", "Evidence due"),
        ("draftReportDue", "Draft report due"),
        ("capaDue", "CAPA due"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleMessages {
    #[serde(default = "default_required")]
    pub required: String,
    #[serde(default = "default_invalid_date")]
    pub invalid_date: String,
    #[serde(default = "default_out_of_order")]
    pub out_of_order: String,
}

impl Default for ScheduleMessages {
    fn default() -> Self {
        Self {
            required: default_required(),
            invalid_date: default_invalid_date(),
            out_of_order: default_out_of_order(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub messages: ScheduleMessages,

    /// Display label per schedule field key (`kickoffMeeting`, ...).
    #[serde(default = "default_field_labels")]
    pub field_labels: BTreeMap<String, String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            messages: ScheduleMessages::default(),
            field_labels: default_field_labels(),
        }
    }
}

impl ScheduleConfig {
    /// Display label for a field key, falling back to the key itself.
    #[must_use]
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.field_labels.get(key).map_or(key, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_fall_back_to_key() {
        let config = ScheduleConfig::default();
        assert_eq!(config.label("capaDue"), "CAPA due");
        assert_eq!(config.label("unknownField"), "unknownField");
    }
}
