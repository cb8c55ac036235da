use aud_config::AuditConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &AuditConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Report(args) => commands::report::handle(&args, config, flags),
        Commands::Schedule(args) => commands::schedule::handle(&args, config, flags),
        Commands::Permission(args) => commands::permission::handle(&args, flags),
        Commands::Classify(args) => commands::classify::handle(&args, flags),
        Commands::Plan(args) => commands::plan::handle(&args, config, flags),
        Commands::Users(args) => commands::users::handle(&args, config, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
