//! Schema store source configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Directory holding `webhooks.json`, `objects.json`, and `custom/*.json`.
    /// The tables compiled into the binary are used when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Check every deduplicated reference right after loading.
    #[serde(default)]
    pub verify_on_load: bool,
}
