//! # wh-core
//!
//! Core types and error types for webhook payload schemas.
//!
//! This crate provides the foundational types shared across all `wh-*` crates:
//! - Parameter records as stored in the deduplicated schema tables
//! - Webhook payload envelopes, generic over full or deduplicated parameters
//! - The description dictionary that payload queries produce
//! - The data-integrity error raised while rehydrating payloads
//! - Post-load normalization rules

pub mod dictionary;
pub mod errors;
pub mod normalize;
pub mod param;

pub use dictionary::{DescriptionDictionary, DescriptionPair, DescriptionValue};
pub use errors::PayloadError;
pub use normalize::StripChildrenRule;
pub use param::{DeduplicatedParam, Param, ParamType, WebhookPayload};

/// Action name reported for events that have a single payload shape.
pub const DEFAULT_ACTION: &str = "default";
