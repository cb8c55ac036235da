//! Schedule step validation.
//!
//! The five milestones must all be present, parse as calendar dates, and be
//! non-decreasing in stage order. Every violating field gets its own message.

use chrono::{DateTime, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use aud_config::ScheduleConfig;
use aud_core::errors::ValidationErrors;

/// Raw schedule form values, keyed the way the form names them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    pub kickoff_meeting: Option<String>,
    pub fieldwork_start: Option<String>,
    pub evidence_due: Option<String>,
    pub draft_report_due: Option<String>,
    pub capa_due: Option<String>,
}

/// A validated schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDates {
    pub kickoff_meeting: NaiveDate,
    pub fieldwork_start: NaiveDate,
    pub evidence_due: NaiveDate,
    pub draft_report_due: NaiveDate,
    pub capa_due: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleField {
    KickoffMeeting,
    FieldworkStart,
    EvidenceDue,
    DraftReportDue,
    CapaDue,
}

impl ScheduleField {
    /// Stage order.
    pub const ALL: [Self; 5] = [
        Self::KickoffMeeting,
        Self::FieldworkStart,
        Self::EvidenceDue,
        Self::DraftReportDue,
        Self::CapaDue,
    ];

    /// Field key used in error maps and form payloads.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::KickoffMeeting => "kickoffMeeting",
            Self::FieldworkStart => "fieldworkStart",
            Self::EvidenceDue => "evidenceDue",
            Self::DraftReportDue => "draftReportDue",
            Self::CapaDue => "capaDue",
        }
    }

    fn raw(self, input: &ScheduleInput) -> Option<&str> {
        match self {
            Self::KickoffMeeting => input.kickoff_meeting.as_deref(),
            Self::FieldworkStart => input.fieldwork_start.as_deref(),
            Self::EvidenceDue => input.evidence_due.as_deref(),
            Self::DraftReportDue => input.draft_report_due.as_deref(),
            Self::CapaDue => input.capa_due.as_deref(),
        }
    }
}

/// Outcome of [`validate_schedule`]. `dates` is set only when `ok`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleValidation {
    pub ok: bool,
    pub errors: ValidationErrors,
    pub dates: Option<ScheduleDates>,
}

/// Parse `YYYY-MM-DD`, or take the date part of an RFC 3339 timestamp.
#[must_use]
pub fn parse_schedule_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub fn validate_schedule(input: &ScheduleInput, config: &ScheduleConfig) -> ScheduleValidation {
    let messages = &config.messages;
    let mut errors = ValidationErrors::new();
    let mut parsed: [Option<NaiveDate>; 5] = [None; 5];
    // Latest valid date seen so far and the field that holds it.
    let mut latest: Option<(ScheduleField, NaiveDate)> = None;

    for (slot, field) in ScheduleField::ALL.into_iter().enumerate() {
        let key = field.key();
        let Some(raw) = field.raw(input).map(str::trim).filter(|v| !v.is_empty()) else {
            errors.insert(key, render(&messages.required, config, field, None));
            continue;
        };
        let Some(date) = parse_schedule_date(raw) else {
            errors.insert(key, render(&messages.invalid_date, config, field, None));
            continue;
        };

        match latest {
            Some((previous, previous_date)) if date < previous_date => {
                errors.insert(
                    key,
                    render(&messages.out_of_order, config, field, Some(previous)),
                );
            }
            _ => latest = Some((field, date)),
        }
        parsed[slot] = Some(date);
    }

    let dates = if errors.is_empty() {
        match parsed {
            [Some(k), Some(f), Some(e), Some(d), Some(c)] => Some(ScheduleDates {
                kickoff_meeting: k,
                fieldwork_start: f,
                evidence_due: e,
                draft_report_due: d,
                capa_due: c,
            }),
            _ => None,
        }
    } else {
        None
    };

    if !errors.is_empty() {
        tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "schedule rejected");
    }

    ScheduleValidation {
        ok: dates.is_some(),
        errors,
        dates,
    }
}

fn render(
    template: &str,
    config: &ScheduleConfig,
    field: ScheduleField,
    previous: Option<ScheduleField>,
) -> String {
    let message = template.replace("{field}", config.label(field.key()));
    match previous {
        Some(previous) => message.replace("{previous}", config.label(previous.key())),
        None => message,
    }
}
