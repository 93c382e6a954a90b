//! Rehydrated payload cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use wh_core::WebhookPayload;

type Actions = HashMap<String, Arc<WebhookPayload>>;

/// Fully expanded payloads keyed by event, then action.
///
/// Entries are created on first request and kept for the life of the cache.
/// Lookup and insert happen under one lock, so each pair is expanded at most
/// once even with concurrent callers, and a cached payload is always
/// complete.
#[derive(Debug, Default)]
pub struct PayloadCache {
    entries: Mutex<HashMap<String, Actions>>,
}

impl PayloadCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached payload for `event`/`action`, if it has been built.
    #[must_use]
    pub fn get(&self, event: &str, action: &str) -> Option<Arc<WebhookPayload>> {
        self.lock().get(event)?.get(action).cloned()
    }

    /// Return the cached payload, or run `build` and cache what it produces.
    ///
    /// `build` returning `Ok(None)` or an error leaves the cache unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the error from `build`.
    pub fn get_or_try_insert_with<E>(
        &self,
        event: &str,
        action: &str,
        build: impl FnOnce() -> Result<Option<WebhookPayload>, E>,
    ) -> Result<Option<Arc<WebhookPayload>>, E> {
        let mut entries = self.lock();
        if let Some(existing) = entries.get(event).and_then(|actions| actions.get(action)) {
            return Ok(Some(Arc::clone(existing)));
        }

        let Some(payload) = build()? else {
            return Ok(None);
        };
        let payload = Arc::new(payload);
        entries
            .entry(event.to_string())
            .or_default()
            .insert(action.to_string(), Arc::clone(&payload));
        Ok(Some(payload))
    }

    /// Number of cached event/action pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Actions>> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
