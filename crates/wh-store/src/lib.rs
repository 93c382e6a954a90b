//! # wh-store
//!
//! The deduplicated webhook schema tables.
//!
//! This crate provides:
//! - `SchemaStore`: webhook payloads keyed by event and action, the shared
//!   objects table their integer references point into, and custom
//!   (non-webhook) event definitions
//! - Loading from the embedded tables or a data directory, with JSON Schema
//!   validation of each table
//! - Post-load normalization and eager reference checking
//!
//! ## Table layout
//!
//! ```text
//! webhooks.json   event -> action -> { descriptionHtml, summaryHtml, bodyParameters: [Param | index] }
//! objects.json    [Param]
//! custom/*.json   one arbitrary JSON value per event, file stem = event name
//! ```
//!
//! Only top-level `bodyParameters` entries may be references; nested
//! `childParamsGroups` are always full records.

mod embedded;
mod error;
mod normalize;
pub mod schema;
mod store;

pub use error::{DanglingReference, StoreError};
pub use schema::{DeduplicatedWebhooks, TableSchemas};
pub use store::SchemaStore;
