//! Expansion of stored payloads into full parameter lists.

use std::sync::Arc;

use wh_core::{DeduplicatedParam, Param, PayloadError, WebhookPayload};
use wh_store::SchemaStore;

use crate::cache::PayloadCache;

/// Resolves event/action pairs to fully expanded payloads, memoized in a
/// [`PayloadCache`].
///
/// Only top-level `bodyParameters` entries are dereferenced. Nested
/// `childParamsGroups` are full records already and are used as stored.
#[derive(Debug)]
pub struct Rehydrator {
    store: Arc<SchemaStore>,
    cache: PayloadCache,
}

impl Rehydrator {
    #[must_use]
    pub const fn new(store: Arc<SchemaStore>, cache: PayloadCache) -> Self {
        Self { store, cache }
    }

    /// Fully expanded payload for `event`/`action`, or `None` if the pair is
    /// not a stored webhook.
    ///
    /// Repeated calls return the same `Arc`.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::InvalidReference` if a reference points past
    /// the objects table. Nothing is cached in that case.
    pub fn webhook_payload(
        &self,
        event: &str,
        action: &str,
    ) -> Result<Option<Arc<WebhookPayload>>, PayloadError> {
        self.cache.get_or_try_insert_with(event, action, || {
            let Some(stored) = self.store.deduplicated_payload(event, action) else {
                return Ok(None);
            };

            tracing::debug!(
                event,
                action,
                params = stored.body_parameters.len(),
                "rehydrating webhook payload"
            );

            let body_parameters = stored
                .body_parameters
                .iter()
                .map(|entry| self.full_param(event, action, entry))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(WebhookPayload {
                description_html: stored.description_html.clone(),
                summary_html: stored.summary_html.clone(),
                body_parameters,
            }))
        })
    }

    /// Resolve one stored entry: a full record is cloned as-is, a reference
    /// is replaced by its objects table entry.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::InvalidReference` for an out-of-range index.
    pub fn full_param(
        &self,
        event: &str,
        action: &str,
        entry: &DeduplicatedParam,
    ) -> Result<Param, PayloadError> {
        match entry {
            DeduplicatedParam::Full(param) => Ok(param.clone()),
            DeduplicatedParam::Reference(index) => {
                let objects = self.store.objects();
                objects
                    .get(*index)
                    .cloned()
                    .ok_or_else(|| PayloadError::InvalidReference {
                        event: event.to_string(),
                        action: action.to_string(),
                        index: *index,
                        len: objects.len(),
                    })
            }
        }
    }

    #[must_use]
    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    #[must_use]
    pub const fn cache(&self) -> &PayloadCache {
        &self.cache
    }
}
