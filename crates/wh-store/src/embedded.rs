//! Schema tables compiled into the binary.

pub const WEBHOOKS_JSON: &str = include_str!("../data/webhooks.json");
pub const OBJECTS_JSON: &str = include_str!("../data/objects.json");

/// Custom (non-webhook) event definitions, keyed by event name.
pub const CUSTOM_EVENTS_JSON: &[(&str, &str)] = &[
    ("schedule", include_str!("../data/custom/schedule.json")),
    (
        "workflow_call",
        include_str!("../data/custom/workflow_call.json"),
    ),
];
