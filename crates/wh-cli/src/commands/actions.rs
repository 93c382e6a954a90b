use wh_payloads::EventPayloads;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ActionsArgs;
use crate::output::output;

/// Handle `whp actions <event>`.
///
/// An unknown event prints an empty list rather than failing.
pub fn handle(
    args: &ActionsArgs,
    payloads: &EventPayloads,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(&payloads.supported_event_types(&args.event), flags.format)
}
