use wh_payloads::EventPayloads;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    payloads: &EventPayloads,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Events => commands::events::handle(payloads, flags),
        Commands::Actions(args) => commands::actions::handle(args, payloads, flags),
        Commands::Payload(args) => commands::payload::handle(args, payloads, flags),
        Commands::Check => commands::check::handle(payloads, flags),
    }
}
