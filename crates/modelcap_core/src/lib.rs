//! # modelcap_core
//!
//! Model capability resolution: deciding how a request to an inference
//! provider should be shaped for a given model and set of user settings.
//!
//! ## Features
//!
//! - **Reasoning modes**: whether a thinking budget or an effort level applies
//! - **Output budget**: the `max_tokens` to send, via an ordered rule table
//! - **Routers**: closed set of routing backends and their listing options
//! - **Catalog**: built-in model tables for providers without a model API
//! - **Router cache**: file-backed model lists fetched from routers
//! - **Settings**: JSON/YAML/TOML settings with environment overrides
//!
//! ## Example
//!
//! ```rust
//! use modelcap_core::{resolve_max_output_tokens, ApiFormat, ModelInfo};
//!
//! let model = ModelInfo::new(8192, 128_000);
//! let max_tokens = resolve_max_output_tokens("gpt-4o", &model, None, Some(ApiFormat::OpenAi));
//! assert_eq!(max_tokens, Some(8192));
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod info;
pub mod max_tokens;
pub mod reasoning;
pub mod router;
pub mod settings;

pub use cache::{ModelRecord, RouterModels, RouterModelsCache};
pub use catalog::ModelCatalog;
pub use config::{apply_overrides, load_settings, load_settings_file};
pub use error::{ModelError, ModelResult};
pub use format::ApiFormat;
pub use info::{ModelInfo, ReasoningEffort};
pub use max_tokens::{
    resolve_max_output_tokens, resolve_max_output_tokens_traced, MaxTokensDecision,
    MaxTokensRequest, MaxTokensRule, ANTHROPIC_DEFAULT_MAX_TOKENS,
    CLAUDE_CODE_DEFAULT_MAX_OUTPUT_TOKENS, MAX_TOKENS_RULES,
};
pub use reasoning::{
    effective_reasoning_effort, thinking_budget, uses_reasoning_budget, uses_reasoning_effort,
    DEFAULT_HYBRID_REASONING_MODEL_MAX_TOKENS, DEFAULT_HYBRID_REASONING_MODEL_THINKING_TOKENS,
};
pub use router::{is_router_name, to_router_name, GetModelsOptions, RouterName};
pub use settings::{ApiHandlerOptions, ApiProvider, ProviderSettings};
