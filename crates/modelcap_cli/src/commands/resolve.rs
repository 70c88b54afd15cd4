//! Resolve command - Decide max output tokens and reasoning mode for a model.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use modelcap_core::{
    effective_reasoning_effort, load_settings, resolve_max_output_tokens_traced, thinking_budget,
    to_router_name, uses_reasoning_budget, uses_reasoning_effort, ApiFormat, ApiProvider,
    MaxTokensRequest,
    ModelCatalog, ModelError, ModelInfo, ProviderSettings, RouterModelsCache,
};

#[derive(Args)]
pub struct ResolveArgs {
    /// Model id (defaults to apiModelId from settings)
    #[arg(short, long)]
    model: Option<String>,

    /// Built-in catalog to look the model up in (anthropic, cerebras, fireworks)
    #[arg(short, long, conflicts_with = "router")]
    provider: Option<String>,

    /// Router whose cached model list holds the model
    #[arg(short, long)]
    router: Option<String>,

    /// Router model cache file (defaults to .modelcap/router-models.json)
    #[arg(long, requires = "router")]
    cache: Option<PathBuf>,

    /// Maximum cache age in hours
    #[arg(long, default_value_t = 24)]
    max_cache_age: i64,

    /// Outbound wire format (anthropic, openai, gemini, openrouter)
    #[arg(short, long)]
    format: Option<String>,

    /// Settings file (json, yaml or toml)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// Everything the resolver decided for one model.
#[derive(Debug, PartialEq)]
pub struct ResolveReport {
    pub model_id: String,
    pub source: String,
    pub max_tokens: Option<u64>,
    pub rule: &'static str,
    pub reasoning_budget: bool,
    pub thinking_tokens: Option<u64>,
    pub reasoning_effort: bool,
    pub effort: Option<String>,
}

impl ResolveReport {
    pub fn build(
        model_id: &str,
        source: &str,
        model: &ModelInfo,
        settings: &ProviderSettings,
        format: Option<ApiFormat>,
    ) -> Self {
        let mut request = MaxTokensRequest::new(model_id, model).with_settings(settings);
        request.format = format;
        let decision = resolve_max_output_tokens_traced(&request);

        Self {
            model_id: model_id.to_string(),
            source: source.to_string(),
            max_tokens: decision.max_tokens,
            rule: decision.rule,
            reasoning_budget: uses_reasoning_budget(model, Some(settings)),
            thinking_tokens: thinking_budget(model, Some(settings)),
            reasoning_effort: uses_reasoning_effort(model, Some(settings)),
            effort: effective_reasoning_effort(model, Some(settings)).map(|e| e.to_string()),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "modelId": self.model_id,
            "source": self.source,
            "maxTokens": self.max_tokens,
            "rule": self.rule,
            "reasoningBudget": self.reasoning_budget,
            "thinkingTokens": self.thinking_tokens,
            "reasoningEffort": self.reasoning_effort,
            "effort": self.effort,
        })
    }

    fn print(&self) {
        println!("🔎 {} ({})", self.model_id, self.source);
        match self.max_tokens {
            Some(tokens) => println!("   max output tokens: {}", tokens),
            None => println!("   max output tokens: unset (provider default)"),
        }
        println!("   rule:              {}", self.rule);
        match self.thinking_tokens {
            Some(tokens) => println!("   reasoning budget:  yes ({} thinking tokens)", tokens),
            None => println!("   reasoning budget:  no"),
        }
        match &self.effort {
            Some(effort) if self.reasoning_effort => println!("   reasoning effort:  {}", effort),
            _ => println!("   reasoning effort:  no"),
        }
    }
}

pub fn execute(args: ResolveArgs) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let settings = load_settings(&current_dir, args.settings.as_deref())
        .context("Failed to load provider settings")?;

    let model_id = args
        .model
        .clone()
        .or_else(|| settings.api_model_id.clone())
        .ok_or_else(|| {
            ModelError::MissingArgument(
                "model (pass --model or set apiModelId in settings)".to_string(),
            )
        })?;

    let format = args
        .format
        .as_deref()
        .map(str::parse::<ApiFormat>)
        .transpose()?;

    let report = if let Some(router) = args.router.as_deref() {
        let router = to_router_name(Some(router))?;
        let cache = match &args.cache {
            Some(path) => RouterModelsCache::new(path.clone()),
            None => RouterModelsCache::in_workspace(&current_dir),
        };
        debug!(path = %cache.path().display(), "reading router model cache");

        let models = cache.load_fresh(args.max_cache_age)?.with_context(|| {
            format!(
                "Router model cache {} is missing or older than {}h",
                cache.path().display(),
                args.max_cache_age
            )
        })?;
        let model = models.require_model(router, &model_id)?;
        ResolveReport::build(&model_id, router.as_str(), model, &settings, format)
    } else {
        let catalog = ModelCatalog::builtin();
        let (provider, model) = match args.provider.as_deref() {
            Some(provider) => {
                let provider: ApiProvider = provider.parse()?;
                (provider, catalog.lookup(provider, &model_id)?)
            }
            None => catalog.find(&model_id).ok_or_else(|| ModelError::UnknownModel {
                provider: "catalog".to_string(),
                model: model_id.clone(),
            })?,
        };
        ResolveReport::build(&model_id, provider.as_str(), model, &settings, format)
    };

    info!(model = %report.model_id, rule = report.rule, "resolved");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        report.print();
    }

    Ok(())
}
