use aud_config::AuditConfig;
use aud_engine::validate_schedule;
use aud_engine::workflow::schedule::ScheduleInput;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScheduleArgs;
use crate::output::output;

/// Handle `audt schedule`.
pub fn handle(args: &ScheduleArgs, config: &AuditConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let validation = validate_schedule(&to_input(args), &config.schedule);
    output(&validation, flags.format)
}

fn to_input(args: &ScheduleArgs) -> ScheduleInput {
    ScheduleInput {
        kickoff_meeting: args.kickoff_meeting.clone(),
        fieldwork_start: args.fieldwork_start.clone(),
        evidence_due: args.evidence_due.clone(),
        draft_report_due: args.draft_report_due.clone(),
        capa_due: args.capa_due.clone(),
    }
}

#[cfg(test)]
mod tests {
    use aud_config::ScheduleConfig;

    use super::*;

    #[test]
    fn kickoff_after_fieldwork_fails_on_fieldwork() {
        let args = ScheduleArgs {
            kickoff_meeting: Some("2024-01-10".into()),
            fieldwork_start: Some("2024-01-05".into()),
            evidence_due: Some("2024-01-20".into()),
            draft_report_due: Some("2024-02-01".into()),
            capa_due: Some("2024-03-01".into()),
        };
        let validation = validate_schedule(&to_input(&args), &ScheduleConfig::default());
        assert!(!validation.ok);
        assert!(validation.errors.contains("fieldworkStart"));
    }
}
