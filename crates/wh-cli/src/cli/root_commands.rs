use clap::{Args, Subcommand};
use wh_core::DEFAULT_ACTION;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List every known event.
    Events,
    /// List the actions of an event.
    Actions(ActionsArgs),
    /// Show the description dictionary of an event payload.
    Payload(PayloadArgs),
    /// Check every deduplicated reference in the schema tables.
    Check,
}

#[derive(Clone, Debug, Args)]
pub struct ActionsArgs {
    /// Event name, e.g. `pull_request`.
    pub event: String,
}

#[derive(Clone, Debug, Args)]
pub struct PayloadArgs {
    /// Event name, e.g. `pull_request`.
    pub event: String,

    /// Action name, e.g. `opened`.
    #[arg(default_value = DEFAULT_ACTION)]
    pub action: String,

    /// Dotted path to a single field, e.g. `pull_request.head.ref`.
    #[arg(long)]
    pub path: Option<String>,
}
