//! Post-load normalization configuration.

use serde::{Deserialize, Serialize};
use wh_core::StripChildrenRule;

fn default_strip_children() -> Vec<StripChildrenRule> {
    vec![StripChildrenRule::workflow_dispatch_inputs()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizeConfig {
    /// Top-level fields whose nested members are dropped after load.
    #[serde(default = "default_strip_children")]
    pub strip_children: Vec<StripChildrenRule>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            strip_children: default_strip_children(),
        }
    }
}
