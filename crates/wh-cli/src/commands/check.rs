use serde::Serialize;
use wh_payloads::EventPayloads;
use wh_store::StoreError;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CheckReport {
    events: usize,
    objects: usize,
    dangling: Vec<String>,
}

impl CheckReport {
    fn is_valid(&self) -> bool {
        self.dangling.is_empty()
    }
}

/// Handle `whp check`.
///
/// Prints the report, then fails if any reference dangles.
pub fn handle(payloads: &EventPayloads, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = build_report(payloads)?;
    output(&report, flags.format)?;

    if !report.is_valid() {
        anyhow::bail!(
            "{} deduplicated references point past the objects table",
            report.dangling.len()
        );
    }
    Ok(())
}

fn build_report(payloads: &EventPayloads) -> anyhow::Result<CheckReport> {
    let store = payloads.rehydrator().store();
    let dangling = match store.verify_references() {
        Ok(()) => Vec::new(),
        Err(StoreError::InvalidReferences { dangling, .. }) => {
            dangling.iter().map(ToString::to_string).collect()
        }
        Err(other) => return Err(other.into()),
    };

    Ok(CheckReport {
        events: store.events().len(),
        objects: store.objects().len(),
        dangling,
    })
}
