//! Event payload queries used by hover, completion, and expression
//! validation.

use std::sync::Arc;

use wh_core::{DEFAULT_ACTION, DescriptionDictionary, PayloadError, StripChildrenRule};
use wh_store::SchemaStore;

use crate::cache::PayloadCache;
use crate::merge::{merge_object, merge_param};
use crate::rehydrate::Rehydrator;

/// Answers "which actions does this event have" and "which fields does this
/// event payload have".
#[derive(Debug)]
pub struct EventPayloads {
    rehydrator: Rehydrator,
}

impl EventPayloads {
    /// Wrap an already normalized store and a cache.
    #[must_use]
    pub const fn new(store: Arc<SchemaStore>, cache: PayloadCache) -> Self {
        Self {
            rehydrator: Rehydrator::new(store, cache),
        }
    }

    /// Normalize `store` with `rules` and rehydrate every rule's target
    /// payload up front, so the normalized payloads are cached before the
    /// first query.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::InvalidReference` if a target payload holds a
    /// dangling reference.
    pub fn with_normalization(
        store: SchemaStore,
        rules: &[StripChildrenRule],
    ) -> Result<Self, PayloadError> {
        let payloads = Self::new(Arc::new(store.normalized(rules)), PayloadCache::new());
        for rule in rules {
            payloads.rehydrator.webhook_payload(&rule.event, &rule.action)?;
        }
        Ok(payloads)
    }

    /// Action names known for `event`.
    ///
    /// Webhook events list their stored actions; custom events report the
    /// single [`DEFAULT_ACTION`]; unknown events report nothing.
    #[must_use]
    pub fn supported_event_types(&self, event: &str) -> Vec<String> {
        let store = self.rehydrator.store();
        if let Some(actions) = store.webhook_actions(event) {
            return actions.into_iter().map(ToString::to_string).collect();
        }
        if store.custom_event(event).is_some() {
            return vec![DEFAULT_ACTION.to_string()];
        }
        Vec::new()
    }

    /// Description dictionary for the `event`/`action` payload.
    ///
    /// Webhook data wins. Otherwise a custom definition for `event` is used
    /// and `action` is ignored. `Ok(None)` means neither source knows the
    /// event.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::InvalidReference` if the stored webhook payload
    /// references a missing objects table entry.
    pub fn event_payload(
        &self,
        event: &str,
        action: &str,
    ) -> Result<Option<DescriptionDictionary>, PayloadError> {
        if let Some(payload) = self.rehydrator.webhook_payload(event, action)? {
            let mut dictionary = DescriptionDictionary::new();
            for param in &payload.body_parameters {
                merge_param(&mut dictionary, param);
            }
            return Ok(Some(dictionary));
        }

        // Not every event is a real webhook.
        Ok(self
            .rehydrator
            .store()
            .custom_event(event)
            .map(|definition| {
                let mut dictionary = DescriptionDictionary::new();
                merge_object(&mut dictionary, definition);
                dictionary
            }))
    }

    /// Every known event name, sorted.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.rehydrator
            .store()
            .events()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    #[must_use]
    pub const fn rehydrator(&self) -> &Rehydrator {
        &self.rehydrator
    }
}
