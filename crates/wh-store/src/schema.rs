//! JSON Schemas for the on-disk tables.
//!
//! Schemas are generated from the `wh-core` types with [`schemars::schema_for!`]
//! and checked with `jsonschema`, so a malformed table is reported with every
//! offending location at once instead of the first serde error.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use schemars::schema_for;
use wh_core::{DeduplicatedParam, Param, WebhookPayload};

use crate::error::StoreError;

/// Name of the `webhooks.json` table schema.
pub const WEBHOOKS: &str = "webhooks";
/// Name of the `objects.json` table schema.
pub const OBJECTS: &str = "objects";

/// Event name → action name → stored payload.
///
/// Actions keep the order they have in `webhooks.json`.
pub type DeduplicatedWebhooks =
    BTreeMap<String, IndexMap<String, WebhookPayload<DeduplicatedParam>>>;

/// Schemas for every table with a fixed shape. Custom event definitions are
/// free-form and have none.
pub struct TableSchemas {
    schemas: HashMap<&'static str, serde_json::Value>,
}

impl TableSchemas {
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();
        schemas.insert(WEBHOOKS, schema_for!(DeduplicatedWebhooks).as_value().clone());
        schemas.insert(OBJECTS, schema_for!(Vec<Param>).as_value().clone());
        Self { schemas }
    }

    /// Get a schema by table name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, table: &str) -> Option<&serde_json::Value> {
        self.schemas.get(table)
    }

    /// Validate a parsed table against its schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Generation` if the table name is unknown or the
    /// schema does not compile, or `StoreError::SchemaViolation` listing every
    /// validation error.
    pub fn validate(&self, table: &str, instance: &serde_json::Value) -> Result<(), StoreError> {
        let schema = self
            .get(table)
            .ok_or_else(|| StoreError::Generation(format!("no schema for table '{table}'")))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| StoreError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::SchemaViolation {
                table: table.to_string(),
                errors,
            })
        }
    }
}

impl Default for TableSchemas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_tables_have_schemas() {
        let schemas = TableSchemas::new();
        assert!(schemas.get(WEBHOOKS).is_some());
        assert!(schemas.get(OBJECTS).is_some());
        assert!(schemas.get("schedule").is_none());
    }

    #[test]
    fn accepts_well_formed_webhooks() {
        let schemas = TableSchemas::new();
        let table = serde_json::json!({
            "push": {
                "default": {
                    "descriptionHtml": "",
                    "summaryHtml": "",
                    "bodyParameters": [0, {"type": "string", "name": "ref", "description": ""}]
                }
            }
        });
        assert!(schemas.validate(WEBHOOKS, &table).is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let schemas = TableSchemas::new();
        let table = serde_json::json!([
            {"type": "string", "description": "no name"},
            {"type": "string", "name": 7}
        ]);
        let Err(StoreError::SchemaViolation { table, errors }) = schemas.validate(OBJECTS, &table)
        else {
            panic!("expected SchemaViolation");
        };
        assert_eq!(table, OBJECTS);
        assert!(errors.len() >= 2, "{errors:?}");
    }

    #[test]
    fn unknown_table_is_a_generation_error() {
        let schemas = TableSchemas::new();
        let result = schemas.validate("bogus", &serde_json::json!({}));
        assert!(matches!(result, Err(StoreError::Generation(_))));
    }
}
