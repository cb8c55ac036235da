use anyhow::bail;
use schemars::{JsonSchema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Type names accepted by `audt schema`.
pub const SCHEMA_TYPES: [&str; 15] = [
    "audit",
    "checklist_item",
    "finding",
    "attachment",
    "action",
    "access_grant",
    "department",
    "user_account",
    "report",
    "permission_preview",
    "validation_errors",
    "schedule_input",
    "schedule_validation",
    "plan_event",
    "plan_draft",
];

/// Handle `audt schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_value(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_value(type_name: &str) -> anyhow::Result<serde_json::Value> {
    use aud_core::entities::{
        AccessGrant, Action, Attachment, Audit, ChecklistItem, Department, Finding, UserAccount,
    };
    use aud_core::errors::ValidationErrors;
    use aud_core::responses::{PermissionPreview, Report};
    use aud_engine::workflow::schedule::{ScheduleInput, ScheduleValidation};
    use aud_engine::workflow::{PlanDraft, PlanEvent};

    match type_name.trim().replace('-', "_").as_str() {
        "audit" => to_value::<Audit>(),
        "checklist_item" => to_value::<ChecklistItem>(),
        "finding" => to_value::<Finding>(),
        "attachment" => to_value::<Attachment>(),
        "action" => to_value::<Action>(),
        "access_grant" => to_value::<AccessGrant>(),
        "department" => to_value::<Department>(),
        "user_account" => to_value::<UserAccount>(),
        "report" => to_value::<Report>(),
        "permission_preview" => to_value::<PermissionPreview>(),
        "validation_errors" => to_value::<ValidationErrors>(),
        "schedule_input" => to_value::<ScheduleInput>(),
        "schedule_validation" => to_value::<ScheduleValidation>(),
        "plan_event" => to_value::<PlanEvent>(),
        "plan_draft" => to_value::<PlanDraft>(),
        other => bail!(
            "unknown schema type '{other}' (expected one of: {})",
            SCHEMA_TYPES.join(", ")
        ),
    }
}

fn to_value<T: JsonSchema>() -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::to_value(schema_for!(T))?)
}
