use aud_core::responses::PermissionPreview;
use aud_engine::derive_permission_state;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PermissionArgs;
use crate::output::output;

/// Handle `audt permission`.
pub fn handle(args: &PermissionArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let state = derive_permission_state(args.sensitive, args.approved, args.minutes);
    output(&PermissionPreview::from(state), flags.format)
}
