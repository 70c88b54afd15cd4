//! Built-in model tables.
//!
//! Providers that do not publish a model list get a static table here.
//! Prices are USD per million tokens as of the table's last revision.

use std::collections::BTreeMap;

use crate::cache::ModelRecord;
use crate::error::{ModelError, ModelResult};
use crate::info::ModelInfo;
use crate::settings::ApiProvider;

pub const FIREWORKS_DEFAULT_MODEL_ID: &str = "accounts/fireworks/models/llama4-maverick-instruct-basic";
pub const CEREBRAS_DEFAULT_MODEL_ID: &str = "llama3.1-8b";
pub const ANTHROPIC_DEFAULT_MODEL_ID: &str = "claude-sonnet-4-20250514";

// =============================================================================
// Fireworks
// =============================================================================

/// Fireworks serverless models. Only the DeepSeek and Llama 4 families are listed.
pub fn fireworks_models() -> ModelRecord {
    let mut models = ModelRecord::new();

    models.insert(
        "accounts/fireworks/models/deepseek-r1".to_string(),
        ModelInfo::new(16_384, 160_000)
            .with_prompt_cache()
            .with_pricing(3.0, 8.0),
    );
    models.insert(
        "accounts/fireworks/models/deepseek-v3".to_string(),
        ModelInfo::new(16_384, 128_000)
            .with_prompt_cache()
            .with_pricing(0.9, 0.9),
    );
    models.insert(
        "accounts/fireworks/models/llama4-scout-instruct-basic".to_string(),
        ModelInfo::new(16_384, 128_000)
            .with_images()
            .with_prompt_cache()
            .with_pricing(0.15, 0.6),
    );
    models.insert(
        "accounts/fireworks/models/llama4-maverick-instruct-basic".to_string(),
        ModelInfo::new(16_384, 1_000_000)
            .with_images()
            .with_prompt_cache()
            .with_pricing(0.22, 0.88),
    );

    models
}

// =============================================================================
// Cerebras
// =============================================================================

/// Cerebras inference models. These advertise a cap equal to their context window.
pub fn cerebras_models() -> ModelRecord {
    let mut models = ModelRecord::new();

    models.insert(
        "llama-4-scout-17b-16e-instruct".to_string(),
        ModelInfo::new(8192, 8192)
            .with_pricing(0.0, 0.0)
            .with_description("Fast inference model with ~2700 tokens/s"),
    );
    models.insert(
        "llama3.1-8b".to_string(),
        ModelInfo::new(8192, 8192)
            .with_pricing(0.0, 0.0)
            .with_description("Efficient model with ~2100 tokens/s"),
    );
    models.insert(
        "llama-3.3-70b".to_string(),
        ModelInfo::new(8192, 8192)
            .with_pricing(0.0, 0.0)
            .with_description("Powerful model with ~2600 tokens/s"),
    );
    models.insert(
        "qwen-3-32b".to_string(),
        ModelInfo::new(16_382, 16_382)
            .with_pricing(0.0, 0.0)
            .with_description("SOTA coding performance with ~2500 tokens/s"),
    );
    models.insert(
        "deepseek-r1-distill-llama-70b".to_string(),
        ModelInfo::new(8192, 8192)
            .with_pricing(0.0, 0.0)
            .with_description("Advanced reasoning model with ~2300 tokens/s (private preview)"),
    );

    models
}

// =============================================================================
// Anthropic
// =============================================================================

pub fn anthropic_models() -> ModelRecord {
    let mut models = ModelRecord::new();

    models.insert(
        "claude-sonnet-4-20250514".to_string(),
        ModelInfo::new(64_000, 200_000)
            .with_images()
            .with_prompt_cache()
            .with_reasoning_budget()
            .with_pricing(3.0, 15.0)
            .with_cache_pricing(3.75, 0.3),
    );
    models.insert(
        "claude-opus-4-20250514".to_string(),
        ModelInfo::new(32_000, 200_000)
            .with_images()
            .with_prompt_cache()
            .with_reasoning_budget()
            .with_pricing(15.0, 75.0)
            .with_cache_pricing(18.75, 1.5),
    );
    models.insert(
        "claude-3-7-sonnet-20250219:thinking".to_string(),
        ModelInfo::new(128_000, 200_000)
            .with_images()
            .with_prompt_cache()
            .with_required_reasoning_budget()
            .with_pricing(3.0, 15.0)
            .with_cache_pricing(3.75, 0.3),
    );
    models.insert(
        "claude-3-5-haiku-20241022".to_string(),
        ModelInfo::new(8192, 200_000)
            .with_prompt_cache()
            .with_pricing(1.0, 5.0)
            .with_cache_pricing(1.25, 0.1),
    );

    models
}

/// All built-in tables, keyed by provider.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    providers: BTreeMap<ApiProvider, (ModelRecord, &'static str)>,
}

impl ModelCatalog {
    pub fn builtin() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(
            ApiProvider::Anthropic,
            (anthropic_models(), ANTHROPIC_DEFAULT_MODEL_ID),
        );
        providers.insert(
            ApiProvider::Cerebras,
            (cerebras_models(), CEREBRAS_DEFAULT_MODEL_ID),
        );
        providers.insert(
            ApiProvider::Fireworks,
            (fireworks_models(), FIREWORKS_DEFAULT_MODEL_ID),
        );
        Self { providers }
    }

    pub fn providers(&self) -> impl Iterator<Item = ApiProvider> + '_ {
        self.providers.keys().copied()
    }

    pub fn models(&self, provider: ApiProvider) -> ModelResult<&ModelRecord> {
        self.providers
            .get(&provider)
            .map(|(models, _)| models)
            .ok_or_else(|| ModelError::UnknownCatalogProvider(provider.to_string()))
    }

    pub fn default_model_id(&self, provider: ApiProvider) -> ModelResult<&'static str> {
        self.providers
            .get(&provider)
            .map(|(_, default_id)| *default_id)
            .ok_or_else(|| ModelError::UnknownCatalogProvider(provider.to_string()))
    }

    pub fn lookup(&self, provider: ApiProvider, model_id: &str) -> ModelResult<&ModelInfo> {
        self.models(provider)?
            .get(model_id)
            .ok_or_else(|| ModelError::UnknownModel {
                provider: provider.to_string(),
                model: model_id.to_string(),
            })
    }

    /// Search every table for a model id.
    pub fn find(&self, model_id: &str) -> Option<(ApiProvider, &ModelInfo)> {
        self.providers
            .iter()
            .find_map(|(provider, (models, _))| models.get(model_id).map(|info| (*provider, info)))
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
