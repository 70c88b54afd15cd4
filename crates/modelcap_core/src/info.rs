//! Static model metadata.
//!
//! A [`ModelInfo`] describes what a model can do and what it costs. Records
//! are immutable once loaded from a catalog table or a router model cache.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};

/// Coarse reasoning effort level exposed by some models instead of a numeric budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReasoningEffort {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ModelError::InvalidReasoningEffort(s.to_string())),
        }
    }
}

/// Capability and pricing record for a single model.
///
/// Prices are USD per million tokens.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Provider-advertised output cap. Zero is treated the same as unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    /// Upper bound on thinking tokens for hybrid reasoning models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_thinking_tokens: Option<u64>,
    /// Total token budget (input + output)
    pub context_window: u64,
    #[serde(default)]
    pub supports_images: bool,
    #[serde(default)]
    pub supports_prompt_cache: bool,
    /// Model accepts a numeric thinking budget
    #[serde(default)]
    pub supports_reasoning_budget: bool,
    /// Model cannot run without a thinking budget
    #[serde(default)]
    pub required_reasoning_budget: bool,
    /// Model accepts a coarse effort level
    #[serde(default)]
    pub supports_reasoning_effort: bool,
    /// Effort level the model always runs with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_writes_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_reads_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelInfo {
    /// Create a record with the given output cap and context window.
    pub fn new(max_tokens: u64, context_window: u64) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            context_window,
            ..Default::default()
        }
    }

    pub fn with_images(mut self) -> Self {
        self.supports_images = true;
        self
    }

    pub fn with_prompt_cache(mut self) -> Self {
        self.supports_prompt_cache = true;
        self
    }

    /// Mark as a hybrid reasoning model.
    pub fn with_reasoning_budget(mut self) -> Self {
        self.supports_reasoning_budget = true;
        self
    }

    /// Mark as a model that always thinks.
    pub fn with_required_reasoning_budget(mut self) -> Self {
        self.supports_reasoning_budget = true;
        self.required_reasoning_budget = true;
        self
    }

    pub fn with_reasoning_effort_support(mut self) -> Self {
        self.supports_reasoning_effort = true;
        self
    }

    pub fn with_forced_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    pub fn with_thinking_tokens(mut self, tokens: u64) -> Self {
        self.max_thinking_tokens = Some(tokens);
        self
    }

    pub fn with_pricing(mut self, input_price: f64, output_price: f64) -> Self {
        self.input_price = Some(input_price);
        self.output_price = Some(output_price);
        self
    }

    pub fn with_cache_pricing(mut self, writes: f64, reads: f64) -> Self {
        self.cache_writes_price = Some(writes);
        self.cache_reads_price = Some(reads);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// The advertised output cap, if it is a real (nonzero) value.
    pub fn output_cap(&self) -> Option<u64> {
        self.max_tokens.filter(|&tokens| tokens > 0)
    }

    /// Whether `max_tokens` is a genuine output cap rather than an alias of the context window.
    pub fn has_distinct_output_cap(&self) -> bool {
        self.output_cap()
            .is_some_and(|tokens| tokens != self.context_window)
    }

    /// Estimated USD cost for the given token counts, when pricing is known.
    pub fn estimate_cost(&self, input_tokens: u64, output_tokens: u64) -> Option<f64> {
        let input_price = self.input_price?;
        let output_price = self.output_price?;
        let input_cost = (input_tokens as f64 / 1_000_000.0) * input_price;
        let output_cost = (output_tokens as f64 / 1_000_000.0) * output_price;
        Some(input_cost + output_cost)
    }
}
