//! CLI command definitions.

use clap::{Parser, Subcommand};

pub mod models;
pub mod resolve;
pub mod router;

/// modelcap - model capability and output budget resolver
#[derive(Parser)]
#[command(name = "modelcap")]
#[command(version, about = "modelcap - model capability and output budget resolver")]
#[command(long_about = r#"
modelcap decides how a request to an inference provider should be shaped:
whether a thinking budget or effort level applies, and which max_tokens value
to send for a given model, settings file and wire format.

COMMANDS:
  resolve  → Resolve max output tokens and reasoning mode for a model
  models   → List built-in catalog models
  router   → Validate a router name and its model-listing options

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or configuration
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve max output tokens and reasoning mode for a model
    Resolve(resolve::ResolveArgs),

    /// List built-in catalog models
    Models(models::ModelsArgs),

    /// Validate a router name and its model-listing options
    Router(router::RouterArgs),
}
