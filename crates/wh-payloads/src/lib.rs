//! # wh-payloads
//!
//! Turns stored webhook schemas into description dictionaries.
//!
//! ```text
//! SchemaStore -> Rehydrator (+ PayloadCache) -> merge -> EventPayloads
//! ```
//!
//! - [`Rehydrator`] expands integer references in a payload's top-level
//!   parameter list, once per event/action pair.
//! - [`merge`] folds parameter records and plain JSON values into one
//!   dictionary shape, first write wins.
//! - [`EventPayloads`] is the query surface: supported actions per event and
//!   the payload dictionary per event/action.
//!
//! # Usage
//!
//! ```no_run
//! use wh_core::StripChildrenRule;
//! use wh_payloads::EventPayloads;
//! use wh_store::SchemaStore;
//!
//! let store = SchemaStore::embedded().expect("embedded tables");
//! let payloads =
//!     EventPayloads::with_normalization(store, &[StripChildrenRule::workflow_dispatch_inputs()])
//!         .expect("valid references");
//!
//! let actions = payloads.supported_event_types("pull_request");
//! if let Some(dictionary) = payloads.event_payload("pull_request", &actions[0]).expect("valid") {
//!     let head = dictionary.get_path("pull_request.head.ref");
//!     println!("{:?}", head.and_then(|pair| pair.description.as_deref()));
//! }
//! ```

mod cache;
pub mod merge;
mod query;
mod rehydrate;

pub use cache::PayloadCache;
pub use query::EventPayloads;
pub use rehydrate::Rehydrator;
