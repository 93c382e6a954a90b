//! The read-only schema store.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use wh_core::{DeduplicatedParam, Param, StripChildrenRule, WebhookPayload};

use crate::embedded;
use crate::error::{DanglingReference, StoreError};
use crate::normalize;
use crate::schema::{DeduplicatedWebhooks, OBJECTS, TableSchemas, WEBHOOKS};

/// Deduplicated webhook payloads, the shared objects table, and custom event
/// definitions.
///
/// Built once at startup. After [`SchemaStore::normalized`] has run the store
/// is only ever read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaStore {
    webhooks: DeduplicatedWebhooks,
    objects: Vec<Param>,
    custom: BTreeMap<String, serde_json::Value>,
}

impl SchemaStore {
    #[must_use]
    pub const fn from_parts(
        webhooks: DeduplicatedWebhooks,
        objects: Vec<Param>,
        custom: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            webhooks,
            objects,
            custom,
        }
    }

    /// Parse and validate the tables from JSON text.
    ///
    /// `custom` yields `(event name, definition)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Json` for unparseable text and
    /// `StoreError::SchemaViolation` for tables of the wrong shape.
    pub fn from_json<'a, I, S>(
        webhooks: &str,
        objects: &str,
        custom: I,
    ) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (S, &'a str)>,
        S: Into<String>,
    {
        let schemas = TableSchemas::new();
        let webhooks: DeduplicatedWebhooks = parse_table(&schemas, WEBHOOKS, webhooks)?;
        let objects: Vec<Param> = parse_table(&schemas, OBJECTS, objects)?;

        let mut definitions = BTreeMap::new();
        for (event, text) in custom {
            let event = event.into();
            let value = serde_json::from_str(text).map_err(|source| StoreError::Json {
                what: format!("custom event '{event}'"),
                source,
            })?;
            definitions.insert(event, value);
        }

        let store = Self::from_parts(webhooks, objects, definitions);
        tracing::debug!(
            events = store.webhooks.len(),
            objects = store.objects.len(),
            custom = store.custom.len(),
            "loaded schema store"
        );
        Ok(store)
    }

    /// The tables compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data itself is malformed.
    pub fn embedded() -> Result<Self, StoreError> {
        Self::from_json(
            embedded::WEBHOOKS_JSON,
            embedded::OBJECTS_JSON,
            embedded::CUSTOM_EVENTS_JSON.iter().copied(),
        )
    }

    /// Read `webhooks.json`, `objects.json`, and every `custom/*.json` from
    /// `dir`. Each custom file's stem is its event name; `custom/` may be
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` for unreadable files in addition to the
    /// [`Self::from_json`] errors.
    pub fn from_dir(dir: &Path) -> Result<Self, StoreError> {
        let webhooks = read(&dir.join("webhooks.json"))?;
        let objects = read(&dir.join("objects.json"))?;

        let mut custom = Vec::new();
        let custom_dir = dir.join("custom");
        if custom_dir.is_dir() {
            let entries = fs::read_dir(&custom_dir).map_err(|source| StoreError::Io {
                path: custom_dir.clone(),
                source,
            })?;
            for entry in entries {
                let path = entry
                    .map_err(|source| StoreError::Io {
                        path: custom_dir.clone(),
                        source,
                    })?
                    .path();
                if path.extension().and_then(|v| v.to_str()) != Some("json") {
                    continue;
                }
                let Some(event) = path.file_stem().and_then(|v| v.to_str()) else {
                    continue;
                };
                custom.push((event.to_string(), read(&path)?));
            }
        }

        Self::from_json(
            &webhooks,
            &objects,
            custom.iter().map(|(event, text)| (event.as_str(), text.as_str())),
        )
    }

    /// Read tables from `data_dir`, or use the embedded tables when `None`.
    ///
    /// # Errors
    ///
    /// See [`Self::from_dir`] and [`Self::embedded`].
    pub fn open(data_dir: Option<&Path>) -> Result<Self, StoreError> {
        match data_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    /// Apply post-load normalization rules. Targets that do not exist are
    /// skipped.
    #[must_use]
    pub fn normalized(mut self, rules: &[StripChildrenRule]) -> Self {
        for rule in rules {
            normalize::strip_children(&mut self.webhooks, &self.objects, rule);
        }
        self
    }

    /// Stored payload for `event`/`action`, references unresolved.
    #[must_use]
    pub fn deduplicated_payload(
        &self,
        event: &str,
        action: &str,
    ) -> Option<&WebhookPayload<DeduplicatedParam>> {
        self.webhooks.get(event)?.get(action)
    }

    /// Action names stored for a webhook event, in table order, or `None` if
    /// `event` is not a webhook.
    #[must_use]
    pub fn webhook_actions(&self, event: &str) -> Option<Vec<&str>> {
        self.webhooks
            .get(event)
            .map(|actions| actions.keys().map(String::as_str).collect())
    }

    /// Definition of a custom (non-webhook) event.
    #[must_use]
    pub fn custom_event(&self, event: &str) -> Option<&serde_json::Value> {
        self.custom.get(event)
    }

    /// The shared objects table.
    #[must_use]
    pub fn objects(&self) -> &[Param] {
        &self.objects
    }

    /// Every known event name, webhook and custom, sorted and deduplicated.
    #[must_use]
    pub fn events(&self) -> Vec<&str> {
        let mut events: Vec<&str> = self
            .webhooks
            .keys()
            .chain(self.custom.keys())
            .map(String::as_str)
            .collect();
        events.sort_unstable();
        events.dedup();
        events
    }

    /// Check every top-level reference against the objects table.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidReferences` listing every dangling
    /// reference.
    pub fn verify_references(&self) -> Result<(), StoreError> {
        let len = self.objects.len();
        let dangling: Vec<DanglingReference> = self
            .webhooks
            .iter()
            .flat_map(|(event, actions)| {
                actions.iter().flat_map(move |(action, payload)| {
                    payload
                        .body_parameters
                        .iter()
                        .enumerate()
                        .filter_map(move |(position, entry)| match entry {
                            DeduplicatedParam::Reference(index) if *index >= len => {
                                Some(DanglingReference {
                                    event: event.clone(),
                                    action: action.clone(),
                                    position,
                                    index: *index,
                                })
                            }
                            _ => None,
                        })
                })
            })
            .collect();

        if dangling.is_empty() {
            Ok(())
        } else {
            Err(StoreError::InvalidReferences { len, dangling })
        }
    }
}

fn read(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_table<T: DeserializeOwned>(
    schemas: &TableSchemas,
    table: &str,
    text: &str,
) -> Result<T, StoreError> {
    let json_error = |source| StoreError::Json {
        what: format!("{table} table"),
        source,
    };
    let value: serde_json::Value = serde_json::from_str(text).map_err(json_error)?;
    schemas.validate(table, &value)?;
    serde_json::from_value(value).map_err(json_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wh_core::ParamType;

    fn store() -> SchemaStore {
        SchemaStore::embedded().expect("embedded tables parse")
    }

    #[test]
    fn embedded_tables_load() {
        let store = store();
        assert!(!store.objects().is_empty());
        assert!(store.deduplicated_payload("push", "default").is_some());
        assert!(store.custom_event("schedule").is_some());
        assert!(store.custom_event("workflow_call").is_some());
    }

    #[test]
    fn embedded_references_are_valid() {
        assert!(store().verify_references().is_ok());
    }

    #[test]
    fn webhook_actions_keep_table_order() {
        let store = store();
        assert_eq!(
            store.webhook_actions("pull_request"),
            Some(vec!["opened", "closed", "synchronize"])
        );
        assert_eq!(store.webhook_actions("workflow_run"), Some(vec!["completed", "requested"]));
        assert_eq!(store.webhook_actions("schedule"), None);
    }

    #[test]
    fn events_merge_webhook_and_custom_names() {
        let store = store();
        let events = store.events();
        assert!(events.contains(&"push"));
        assert!(events.contains(&"schedule"));
        assert!(events.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn dangling_references_are_all_reported() {
        let webhooks = serde_json::json!({
            "push": {"default": {"bodyParameters": [0, 1, 9]}},
            "issues": {"opened": {"bodyParameters": [4]}}
        })
        .to_string();
        let objects = serde_json::json!([
            {"type": "string", "name": "ref", "description": ""}
        ])
        .to_string();
        let store = SchemaStore::from_json(&webhooks, &objects, Vec::<(String, &str)>::new())
            .expect("tables parse");

        let Err(StoreError::InvalidReferences { len, dangling }) = store.verify_references() else {
            panic!("expected InvalidReferences");
        };
        assert_eq!(len, 1);
        let found: Vec<(&str, usize, usize)> = dangling
            .iter()
            .map(|d| (d.event.as_str(), d.position, d.index))
            .collect();
        assert_eq!(found, vec![("issues", 0, 4), ("push", 1, 1), ("push", 2, 9)]);
    }

    #[test]
    fn action_order_survives_schema_validation() {
        let webhooks = r#"{"check_run": {
            "rerequested": {"bodyParameters": []},
            "created": {"bodyParameters": []},
            "completed": {"bodyParameters": []}
        }}"#;
        let store = SchemaStore::from_json(webhooks, "[]", Vec::<(String, &str)>::new())
            .expect("tables parse");
        assert_eq!(
            store.webhook_actions("check_run"),
            Some(vec!["rerequested", "created", "completed"])
        );
    }

    #[test]
    fn malformed_json_names_the_table() {
        let result = SchemaStore::from_json("{", "[]", Vec::<(String, &str)>::new());
        let Err(StoreError::Json { what, .. }) = result else {
            panic!("expected Json error");
        };
        assert_eq!(what, "webhooks table");
    }

    #[test]
    fn wrong_shape_is_a_schema_violation() {
        let result = SchemaStore::from_json(
            r#"{"push": {"default": {"bodyParameters": ["zero"]}}}"#,
            "[]",
            Vec::<(String, &str)>::new(),
        );
        assert!(matches!(
            result,
            Err(StoreError::SchemaViolation { ref table, .. }) if table == WEBHOOKS
        ));
    }

    #[test]
    fn normalization_strips_workflow_dispatch_inputs() {
        let store = SchemaStore::open(None)
            .expect("embedded tables load")
            .normalized(&[StripChildrenRule::workflow_dispatch_inputs()]);
        let payload = store
            .deduplicated_payload("workflow_dispatch", "default")
            .expect("workflow_dispatch is stored");
        let inputs = payload
            .body_parameters
            .iter()
            .find_map(|entry| match entry {
                DeduplicatedParam::Full(param) if param.name == "inputs" => Some(param),
                _ => None,
            })
            .expect("inputs is a full record");
        assert_eq!(inputs.r#type, ParamType::ObjectOrNull);
        assert!(inputs.child_params_groups.is_none());
    }

    #[test]
    fn normalization_without_rules_keeps_raw_data() {
        let store = SchemaStore::open(None)
            .expect("embedded tables load")
            .normalized(&[]);
        assert_eq!(store, self::store());
    }
}
