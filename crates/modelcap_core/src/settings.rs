//! User-controlled provider settings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};
use crate::info::ReasoningEffort;

/// Inference backend selected by the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiProvider {
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "claude-code")]
    ClaudeCode,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "bedrock")]
    Bedrock,
    #[serde(rename = "vertex")]
    Vertex,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "openai-native")]
    OpenAiNative,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "ollama")]
    Ollama,
    #[serde(rename = "lmstudio")]
    LmStudio,
    #[serde(rename = "requesty")]
    Requesty,
    #[serde(rename = "glama")]
    Glama,
    #[serde(rename = "unbound")]
    Unbound,
    #[serde(rename = "litellm")]
    LiteLlm,
    #[serde(rename = "kilocode")]
    Kilocode,
    #[serde(rename = "fireworks")]
    Fireworks,
    #[serde(rename = "cerebras")]
    Cerebras,
}

impl ApiProvider {
    /// Every known provider, in display order.
    pub const ALL: &'static [ApiProvider] = &[
        Self::Anthropic,
        Self::ClaudeCode,
        Self::OpenRouter,
        Self::Bedrock,
        Self::Vertex,
        Self::OpenAi,
        Self::OpenAiNative,
        Self::Gemini,
        Self::DeepSeek,
        Self::Mistral,
        Self::Ollama,
        Self::LmStudio,
        Self::Requesty,
        Self::Glama,
        Self::Unbound,
        Self::LiteLlm,
        Self::Kilocode,
        Self::Fireworks,
        Self::Cerebras,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::ClaudeCode => "claude-code",
            Self::OpenRouter => "openrouter",
            Self::Bedrock => "bedrock",
            Self::Vertex => "vertex",
            Self::OpenAi => "openai",
            Self::OpenAiNative => "openai-native",
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
            Self::Mistral => "mistral",
            Self::Ollama => "ollama",
            Self::LmStudio => "lmstudio",
            Self::Requesty => "requesty",
            Self::Glama => "glama",
            Self::Unbound => "unbound",
            Self::LiteLlm => "litellm",
            Self::Kilocode => "kilocode",
            Self::Fireworks => "fireworks",
            Self::Cerebras => "cerebras",
        }
    }
}

impl std::fmt::Display for ApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApiProvider {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|provider| provider.as_str() == needle)
            .ok_or_else(|| ModelError::InvalidProvider(s.to_string()))
    }
}

/// Provider configuration as stored by the settings layer.
///
/// The resolver only ever borrows this.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_provider: Option<ApiProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_model_id: Option<String>,
    /// User override for the output cap of hybrid reasoning models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_max_tokens: Option<u64>,
    #[serde(default)]
    pub enable_reasoning_effort: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_code_max_output_tokens: Option<u64>,
}

impl ProviderSettings {
    pub fn for_provider(provider: ApiProvider) -> Self {
        Self {
            api_provider: Some(provider),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model_id: &str) -> Self {
        self.api_model_id = Some(model_id.to_string());
        self
    }

    pub fn with_model_max_tokens(mut self, tokens: u64) -> Self {
        self.model_max_tokens = Some(tokens);
        self
    }

    pub fn with_reasoning_enabled(mut self) -> Self {
        self.enable_reasoning_effort = true;
        self
    }

    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    pub fn with_claude_code_max_output_tokens(mut self, tokens: u64) -> Self {
        self.claude_code_max_output_tokens = Some(tokens);
        self
    }

    pub fn is_provider(&self, provider: ApiProvider) -> bool {
        self.api_provider == Some(provider)
    }

    /// Split off the provider, leaving the options a request handler receives.
    pub fn handler_options(&self) -> ApiHandlerOptions {
        ApiHandlerOptions {
            api_model_id: self.api_model_id.clone(),
            model_max_tokens: self.model_max_tokens,
            enable_reasoning_effort: self.enable_reasoning_effort,
            reasoning_effort: self.reasoning_effort,
            claude_code_max_output_tokens: self.claude_code_max_output_tokens,
        }
    }
}

/// Provider settings without the provider selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiHandlerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_max_tokens: Option<u64>,
    #[serde(default)]
    pub enable_reasoning_effort: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_code_max_output_tokens: Option<u64>,
}

impl ApiHandlerOptions {
    /// Reattach a provider.
    pub fn into_settings(self, provider: ApiProvider) -> ProviderSettings {
        ProviderSettings {
            api_provider: Some(provider),
            api_model_id: self.api_model_id,
            model_max_tokens: self.model_max_tokens,
            enable_reasoning_effort: self.enable_reasoning_effort,
            reasoning_effort: self.reasoning_effort,
            claude_code_max_output_tokens: self.claude_code_max_output_tokens,
        }
    }
}
