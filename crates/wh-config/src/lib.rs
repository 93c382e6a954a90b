//! # wh-config
//!
//! Layered configuration loading for the webhook payload tools using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WHP_*` prefix, `__` as separator)
//! 2. Project-level `.whp/config.toml`
//! 3. User-level `~/.config/whp/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WHP_STORE__DATA_DIR` -> `store.data_dir`,
//! `WHP_STORE__VERIFY_ON_LOAD` -> `store.verify_on_load`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use wh_config::WhConfig;
//!
//! let config = WhConfig::load().expect("config");
//! if let Some(dir) = &config.store.data_dir {
//!     println!("reading schema tables from {}", dir.display());
//! }
//! ```

mod error;
mod normalize;
mod store;

pub use error::ConfigError;
pub use normalize::NormalizeConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WhConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

impl WhConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a configuration from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".whp/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("WHP_").split("__"))
    }

    /// Reject normalization rules with blank targets.
    fn validate(&self) -> Result<(), ConfigError> {
        for (position, rule) in self.normalize.strip_children.iter().enumerate() {
            let blank = [
                ("event", &rule.event),
                ("action", &rule.action),
                ("field", &rule.field),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());

            if let Some((name, _)) = blank {
                return Err(ConfigError::InvalidValue {
                    field: format!("normalize.strip_children[{position}].{name}"),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("whp").join("config.toml"))
    }
}
