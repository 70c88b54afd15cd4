//! Output token budget resolution.
//!
//! The effective `max_tokens` for a request is decided by an ordered table of
//! rules. Rules are evaluated top to bottom and the first one whose predicate
//! matches supplies the result. The last rule always matches.
//!
//! | id                      | applies when                                          | result                               |
//! |-------------------------|-------------------------------------------------------|--------------------------------------|
//! | `claude-code`           | provider is `claude-code`                             | user override or 8000                |
//! | `reasoning-budget`      | reasoning-budget mode is active                       | `modelMaxTokens` or 16384            |
//! | `anthropic-hybrid`      | hybrid reasoning model in an Anthropic context        | 8192                                 |
//! | `anthropic-missing-cap` | Anthropic context and no real model cap               | 8192                                 |
//! | `model-cap`             | model cap is set and differs from the context window  | model cap                            |
//! | `provider-default`      | an explicit non-Anthropic format was given            | unset                                |
//! | `fallback`              | always                                                | 8192                                 |

use serde::Serialize;
use tracing::debug;

use crate::format::ApiFormat;
use crate::info::ModelInfo;
use crate::reasoning::{uses_reasoning_budget, DEFAULT_HYBRID_REASONING_MODEL_MAX_TOKENS};
use crate::settings::{ApiProvider, ProviderSettings};

/// Output cap sent to Anthropic-style APIs when nothing better is known.
pub const ANTHROPIC_DEFAULT_MAX_TOKENS: u64 = 8_192;

/// Output cap for the Claude Code provider when the user has not set one.
pub const CLAUDE_CODE_DEFAULT_MAX_OUTPUT_TOKENS: u64 = 8_000;

/// Inputs to a max-output-token decision.
#[derive(Debug, Clone, Copy)]
pub struct MaxTokensRequest<'a> {
    pub model_id: &'a str,
    pub model: &'a ModelInfo,
    pub settings: Option<&'a ProviderSettings>,
    pub format: Option<ApiFormat>,
}

impl<'a> MaxTokensRequest<'a> {
    pub fn new(model_id: &'a str, model: &'a ModelInfo) -> Self {
        Self {
            model_id,
            model,
            settings: None,
            format: None,
        }
    }

    pub fn with_settings(mut self, settings: &'a ProviderSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_format(mut self, format: ApiFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Whether the request will be served with Anthropic semantics.
    pub fn is_anthropic_context(&self) -> bool {
        self.model_id.contains("claude")
            || self.format == Some(ApiFormat::Anthropic)
            || (self.format == Some(ApiFormat::OpenRouter)
                && self.model_id.starts_with("anthropic/"))
    }

    fn provider_is(&self, provider: ApiProvider) -> bool {
        self.settings.is_some_and(|s| s.is_provider(provider))
    }

    fn nonzero_setting(&self, pick: fn(&ProviderSettings) -> Option<u64>) -> Option<u64> {
        self.settings.and_then(pick).filter(|&tokens| tokens > 0)
    }
}

/// One entry of the resolution table.
#[derive(Clone, Copy)]
pub struct MaxTokensRule {
    pub id: &'static str,
    pub description: &'static str,
    applies: fn(&MaxTokensRequest<'_>) -> bool,
    resolve: fn(&MaxTokensRequest<'_>) -> Option<u64>,
}

impl std::fmt::Debug for MaxTokensRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaxTokensRule")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish()
    }
}

impl MaxTokensRule {
    pub fn applies(&self, request: &MaxTokensRequest<'_>) -> bool {
        (self.applies)(request)
    }

    pub fn resolve(&self, request: &MaxTokensRequest<'_>) -> Option<u64> {
        (self.resolve)(request)
    }
}

/// The resolution table, in evaluation order. The last entry matches every request.
pub static MAX_TOKENS_RULES: [MaxTokensRule; 7] = [
    MaxTokensRule {
        id: "claude-code",
        description: "Claude Code provider uses its own output setting",
        applies: |req| req.provider_is(ApiProvider::ClaudeCode),
        resolve: |req| {
            Some(
                req.nonzero_setting(|s| s.claude_code_max_output_tokens)
                    .unwrap_or(CLAUDE_CODE_DEFAULT_MAX_OUTPUT_TOKENS),
            )
        },
    },
    MaxTokensRule {
        id: "reasoning-budget",
        description: "Reasoning budget mode uses the user's model max tokens",
        applies: |req| uses_reasoning_budget(req.model, req.settings),
        resolve: |req| {
            Some(
                req.nonzero_setting(|s| s.model_max_tokens)
                    .unwrap_or(DEFAULT_HYBRID_REASONING_MODEL_MAX_TOKENS),
            )
        },
    },
    MaxTokensRule {
        id: "anthropic-hybrid",
        description: "Hybrid reasoning models are clamped to the Anthropic default",
        applies: |req| req.model.supports_reasoning_budget && req.is_anthropic_context(),
        resolve: |_| Some(ANTHROPIC_DEFAULT_MAX_TOKENS),
    },
    MaxTokensRule {
        id: "anthropic-missing-cap",
        description: "Anthropic requests always carry an explicit cap",
        applies: |req| req.is_anthropic_context() && req.model.output_cap().is_none(),
        resolve: |_| Some(ANTHROPIC_DEFAULT_MAX_TOKENS),
    },
    MaxTokensRule {
        id: "model-cap",
        description: "Model advertises a genuine output cap",
        applies: |req| req.model.has_distinct_output_cap(),
        resolve: |req| req.model.output_cap(),
    },
    MaxTokensRule {
        id: "provider-default",
        description: "Explicit non-Anthropic format leaves the cap to the provider",
        applies: |req| req.format.is_some(),
        resolve: |_| None,
    },
    MaxTokensRule {
        id: "fallback",
        description: "Conservative default when no format is known",
        applies: |_| true,
        resolve: |_| Some(ANTHROPIC_DEFAULT_MAX_TOKENS),
    },
];

/// Outcome of a resolution, with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxTokensDecision {
    pub rule: &'static str,
    pub max_tokens: Option<u64>,
}

/// Resolve the output cap and report which rule decided it.
pub fn resolve_max_output_tokens_traced(request: &MaxTokensRequest<'_>) -> MaxTokensDecision {
    let [ordered @ .., fallback] = &MAX_TOKENS_RULES;
    let rule = ordered
        .iter()
        .find(|rule| rule.applies(request))
        .unwrap_or(fallback);

    let decision = MaxTokensDecision {
        rule: rule.id,
        max_tokens: rule.resolve(request),
    };

    debug!(
        model_id = request.model_id,
        format = ?request.format,
        rule = decision.rule,
        max_tokens = ?decision.max_tokens,
        "resolved max output tokens"
    );

    decision
}

/// Resolve the output cap for a request. `None` means "let the provider decide".
pub fn resolve_max_output_tokens(
    model_id: &str,
    model: &ModelInfo,
    settings: Option<&ProviderSettings>,
    format: Option<ApiFormat>,
) -> Option<u64> {
    let request = MaxTokensRequest {
        model_id,
        model,
        settings,
        format,
    };
    resolve_max_output_tokens_traced(&request).max_tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ReasoningEffort;

    fn rule_for(request: &MaxTokensRequest<'_>) -> &'static str {
        resolve_max_output_tokens_traced(request).rule
    }

    #[test]
    fn test_rule_ids_are_unique_and_fallback_is_last() {
        let ids: Vec<_> = MAX_TOKENS_RULES.iter().map(|r| r.id).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
        assert_eq!(ids.last(), Some(&"fallback"));
    }

    #[test]
    fn test_unmatched_request_lands_on_last_rule() {
        let model = ModelInfo::new(32_000, 32_000);
        let request = MaxTokensRequest::new("mistral-large", &model);

        let [ordered @ .., last] = &MAX_TOKENS_RULES;
        assert!(ordered.iter().all(|rule| !rule.applies(&request)));
        assert!(last.applies(&request));

        let decision = resolve_max_output_tokens_traced(&request);
        assert_eq!(decision.rule, last.id);
        assert_eq!(decision.max_tokens, last.resolve(&request));
        assert_eq!(decision.max_tokens, Some(ANTHROPIC_DEFAULT_MAX_TOKENS));
    }

    #[test]
    fn test_claude_code_override() {
        let model = ModelInfo::new(64_000, 200_000).with_reasoning_budget();
        let settings = ProviderSettings::for_provider(ApiProvider::ClaudeCode)
            .with_claude_code_max_output_tokens(32_000)
            .with_reasoning_enabled();

        let request = MaxTokensRequest::new("claude-sonnet-4", &model).with_settings(&settings);
        assert_eq!(rule_for(&request), "claude-code");
        assert_eq!(
            resolve_max_output_tokens("claude-sonnet-4", &model, Some(&settings), None),
            Some(32_000)
        );
    }

    #[test]
    fn test_claude_code_zero_uses_default() {
        let model = ModelInfo::new(8192, 128_000);
        let settings = ProviderSettings::for_provider(ApiProvider::ClaudeCode)
            .with_claude_code_max_output_tokens(0);

        assert_eq!(
            resolve_max_output_tokens("gpt-4o", &model, Some(&settings), Some(ApiFormat::OpenAi)),
            Some(CLAUDE_CODE_DEFAULT_MAX_OUTPUT_TOKENS)
        );
    }

    #[test]
    fn test_reasoning_budget_uses_model_max_tokens() {
        let model = ModelInfo::new(64_000, 200_000).with_reasoning_budget();
        let settings = ProviderSettings::for_provider(ApiProvider::Anthropic)
            .with_reasoning_enabled()
            .with_model_max_tokens(40_000);

        let request = MaxTokensRequest::new("claude-sonnet-4", &model)
            .with_settings(&settings)
            .with_format(ApiFormat::Anthropic);
        assert_eq!(rule_for(&request), "reasoning-budget");
        assert_eq!(resolve_max_output_tokens_traced(&request).max_tokens, Some(40_000));
    }

    #[test]
    fn test_reasoning_budget_default() {
        let model = ModelInfo::new(128_000, 200_000).with_required_reasoning_budget();
        let settings = ProviderSettings::default().with_model_max_tokens(0);

        assert_eq!(
            resolve_max_output_tokens("claude-3-7-sonnet:thinking", &model, Some(&settings), None),
            Some(DEFAULT_HYBRID_REASONING_MODEL_MAX_TOKENS)
        );
        assert_eq!(
            resolve_max_output_tokens("claude-3-7-sonnet:thinking", &model, None, None),
            Some(DEFAULT_HYBRID_REASONING_MODEL_MAX_TOKENS)
        );
    }

    #[test]
    fn test_hybrid_model_clamped_in_anthropic_context() {
        let model = ModelInfo::new(64_000, 200_000).with_reasoning_budget();

        for (model_id, format) in [
            ("claude-sonnet-4", None),
            ("some-hybrid", Some(ApiFormat::Anthropic)),
            ("anthropic/sonnet", Some(ApiFormat::OpenRouter)),
        ] {
            let mut request = MaxTokensRequest::new(model_id, &model);
            request.format = format;
            let decision = resolve_max_output_tokens_traced(&request);
            assert_eq!(decision.rule, "anthropic-hybrid", "model {}", model_id);
            assert_eq!(decision.max_tokens, Some(ANTHROPIC_DEFAULT_MAX_TOKENS));
        }
    }

    #[test]
    fn test_hybrid_model_outside_anthropic_keeps_cap() {
        let model = ModelInfo::new(64_000, 200_000).with_reasoning_budget();
        assert_eq!(
            resolve_max_output_tokens("gemini-2.5-pro", &model, None, Some(ApiFormat::Gemini)),
            Some(64_000)
        );
    }

    #[test]
    fn test_openrouter_non_anthropic_prefix() {
        let model = ModelInfo::new(0, 128_000);
        let request = MaxTokensRequest::new("openai/gpt-4o", &model).with_format(ApiFormat::OpenRouter);
        assert!(!request.is_anthropic_context());
        assert_eq!(rule_for(&request), "provider-default");
        assert_eq!(resolve_max_output_tokens_traced(&request).max_tokens, None);
    }

    #[test]
    fn test_claude_without_cap_gets_default() {
        let model = ModelInfo::new(0, 200_000);
        let request = MaxTokensRequest::new("claude-3-opus", &model);
        assert_eq!(rule_for(&request), "anthropic-missing-cap");
        assert_eq!(
            resolve_max_output_tokens("claude-3-opus", &model, None, None),
            Some(ANTHROPIC_DEFAULT_MAX_TOKENS)
        );
    }

    #[test]
    fn test_explicit_model_cap_with_openai_format() {
        let model = ModelInfo::new(8192, 128_000);
        let settings = ProviderSettings::default();
        let request = MaxTokensRequest::new("gpt-4o", &model)
            .with_settings(&settings)
            .with_format(ApiFormat::OpenAi);
        assert_eq!(rule_for(&request), "model-cap");
        assert_eq!(resolve_max_output_tokens_traced(&request).max_tokens, Some(8192));
    }

    #[test]
    fn test_cap_equal_to_context_window_is_ignored() {
        let model = ModelInfo::new(8192, 8192);

        assert_eq!(
            resolve_max_output_tokens("llama3.1-8b", &model, None, Some(ApiFormat::OpenAi)),
            None
        );
        assert_eq!(
            resolve_max_output_tokens("llama3.1-8b", &model, None, None),
            Some(ANTHROPIC_DEFAULT_MAX_TOKENS)
        );
    }

    #[test]
    fn test_claude_with_real_cap_uses_it() {
        let model = ModelInfo::new(4096, 200_000);
        assert_eq!(
            resolve_max_output_tokens("claude-3-haiku", &model, None, Some(ApiFormat::Anthropic)),
            Some(4096)
        );
    }

    #[test]
    fn test_effort_settings_do_not_change_cap() {
        let model = ModelInfo::new(100_000, 200_000).with_reasoning_effort_support();
        let settings = ProviderSettings::default().with_reasoning_effort(ReasoningEffort::High);
        assert_eq!(
            resolve_max_output_tokens("o3", &model, Some(&settings), Some(ApiFormat::OpenAi)),
            Some(100_000)
        );
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let model = ModelInfo::new(16_384, 160_000).with_prompt_cache();
        let settings = ProviderSettings::for_provider(ApiProvider::Fireworks);
        let first = resolve_max_output_tokens("deepseek-r1", &model, Some(&settings), None);
        let second = resolve_max_output_tokens("deepseek-r1", &model, Some(&settings), None);
        assert_eq!(first, second);
        assert_eq!(first, Some(16_384));
    }
}
