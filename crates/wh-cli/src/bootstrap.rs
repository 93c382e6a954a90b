use anyhow::Context;
use wh_config::WhConfig;
use wh_payloads::EventPayloads;
use wh_store::SchemaStore;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<WhConfig> {
    let mut config = WhConfig::load_with_dotenv().context("failed to load whp configuration")?;
    if let Some(dir) = &flags.data_dir {
        config.store.data_dir = Some(dir.clone());
    }
    Ok(config)
}

/// Open the schema store and build the query surface over it.
pub fn load_payloads(config: &WhConfig) -> anyhow::Result<EventPayloads> {
    let data_dir = config.store.data_dir.as_deref();
    let store = SchemaStore::open(data_dir).with_context(|| match data_dir {
        Some(dir) => format!("failed to load schema tables from {}", dir.display()),
        None => "failed to load embedded schema tables".to_string(),
    })?;

    if config.store.verify_on_load {
        store.verify_references()?;
    }

    tracing::debug!(
        rules = config.normalize.strip_children.len(),
        "normalizing schema store"
    );
    EventPayloads::with_normalization(store, &config.normalize.strip_children)
        .context("failed to rehydrate normalized payloads")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tables_bootstrap() {
        let payloads = load_payloads(&WhConfig::default()).expect("embedded tables load");
        assert!(!payloads.events().is_empty());
        assert_eq!(payloads.rehydrator().cache().len(), 1);
    }

    #[test]
    fn missing_data_dir_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = WhConfig::default();
        config.store.data_dir = Some(dir.path().join("absent"));

        let error = load_payloads(&config).unwrap_err();
        assert!(format!("{error:#}").contains("failed to load schema tables from"));
    }
}
