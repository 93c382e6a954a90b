use wh_payloads::EventPayloads;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `whp events`.
pub fn handle(payloads: &EventPayloads, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&payloads.events(), flags.format)
}
