use anyhow::bail;
use serde::Serialize;
use wh_core::{DescriptionDictionary, DescriptionPair};
use wh_payloads::EventPayloads;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PayloadArgs;
use crate::output::output;

/// A single field selected with `--path`.
#[derive(Debug, Serialize)]
struct FieldView<'a> {
    path: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a DescriptionDictionary>,
}

impl<'a> FieldView<'a> {
    fn new(path: &'a str, pair: &'a DescriptionPair) -> Self {
        Self {
            path,
            name: &pair.key,
            description: pair.description.as_deref(),
            properties: pair.value.as_nested(),
        }
    }
}

/// Handle `whp payload <event> [action] [--path a.b.c]`.
pub fn handle(
    args: &PayloadArgs,
    payloads: &EventPayloads,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let Some(dictionary) = payloads.event_payload(&args.event, &args.action)? else {
        bail!(
            "no payload known for event '{}' action '{}' (known actions: {:?})",
            args.event,
            args.action,
            payloads.supported_event_types(&args.event)
        );
    };

    match &args.path {
        None => output(&dictionary, flags.format),
        Some(path) => {
            let Some(pair) = dictionary.get_path(path) else {
                bail!(
                    "'{path}' is not a field of the {}/{} payload",
                    args.event,
                    args.action
                );
            };
            output(&FieldView::new(path, pair), flags.format)
        }
    }
}
