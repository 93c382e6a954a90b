//! Post-load normalization of stored payloads.

use wh_core::{DeduplicatedParam, Param, StripChildrenRule};

use crate::schema::DeduplicatedWebhooks;

/// Apply one [`StripChildrenRule`] to the stored tables.
///
/// The first top-level parameter named `rule.field` loses its
/// `childParamsGroups`. A reference is first replaced by an owned copy of its
/// objects table entry, so other payloads sharing that entry are untouched.
///
/// Returns `false` when the event, action, or field does not exist.
pub(crate) fn strip_children(
    webhooks: &mut DeduplicatedWebhooks,
    objects: &[Param],
    rule: &StripChildrenRule,
) -> bool {
    let Some(payload) = webhooks
        .get_mut(&rule.event)
        .and_then(|actions| actions.get_mut(&rule.action))
    else {
        tracing::debug!(event = %rule.event, action = %rule.action, "normalization target payload not found");
        return false;
    };

    // A dangling reference has no name to match, so the search moves past it.
    // Rehydrating this payload reports the dangling index regardless.
    let target = payload
        .body_parameters
        .iter_mut()
        .enumerate()
        .find(|(position, entry)| match resolved_name(entry, objects) {
            Some(name) => name == rule.field,
            None => {
                tracing::debug!(
                    event = %rule.event,
                    action = %rule.action,
                    position = *position,
                    len = objects.len(),
                    "skipping dangling reference while looking for normalization target"
                );
                false
            }
        })
        .map(|(_, entry)| entry);

    let Some(entry) = target else {
        tracing::debug!(
            event = %rule.event,
            action = %rule.action,
            field = %rule.field,
            "normalization target field not found"
        );
        return false;
    };

    if let DeduplicatedParam::Reference(index) = *entry {
        // `resolved_name` only matches references that are in range.
        if let Some(shared) = objects.get(index) {
            *entry = DeduplicatedParam::Full(shared.clone());
        }
    }

    if let DeduplicatedParam::Full(param) = entry {
        param.child_params_groups = None;
    }

    tracing::debug!(
        event = %rule.event,
        action = %rule.action,
        field = %rule.field,
        "stripped nested fields"
    );
    true
}

fn resolved_name<'a>(entry: &'a DeduplicatedParam, objects: &'a [Param]) -> Option<&'a str> {
    match entry {
        DeduplicatedParam::Full(param) => Some(param.name.as_str()),
        DeduplicatedParam::Reference(index) => objects.get(*index).map(|p| p.name.as_str()),
    }
}
