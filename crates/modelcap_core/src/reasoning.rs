//! Reasoning-mode predicates.
//!
//! A model may think with a numeric token budget, with a coarse effort
//! level, or both. The two checks are independent; callers decide how to
//! combine them.

use crate::info::{ModelInfo, ReasoningEffort};
use crate::settings::ProviderSettings;

/// Output cap for hybrid reasoning models when the user has not set one.
pub const DEFAULT_HYBRID_REASONING_MODEL_MAX_TOKENS: u64 = 16_384;

/// Thinking budget for hybrid reasoning models when the user has not set one.
pub const DEFAULT_HYBRID_REASONING_MODEL_THINKING_TOKENS: u64 = 8_192;

/// Whether a numeric thinking budget should be sent for this model.
pub fn uses_reasoning_budget(model: &ModelInfo, settings: Option<&ProviderSettings>) -> bool {
    model.required_reasoning_budget
        || (model.supports_reasoning_budget
            && settings.is_some_and(|s| s.enable_reasoning_effort))
}

/// Whether an effort level should be sent for this model.
pub fn uses_reasoning_effort(model: &ModelInfo, settings: Option<&ProviderSettings>) -> bool {
    (model.supports_reasoning_effort
        && settings.is_some_and(|s| s.reasoning_effort.is_some()))
        || model.reasoning_effort.is_some()
}

/// The effort level to send, if any.
///
/// A user choice wins when the model accepts one; otherwise the model's own level applies.
pub fn effective_reasoning_effort(
    model: &ModelInfo,
    settings: Option<&ProviderSettings>,
) -> Option<ReasoningEffort> {
    let user_choice = settings
        .and_then(|s| s.reasoning_effort)
        .filter(|_| model.supports_reasoning_effort);

    user_choice.or(model.reasoning_effort)
}

/// The thinking budget to send alongside `max_tokens`, if reasoning-budget mode applies.
pub fn thinking_budget(model: &ModelInfo, settings: Option<&ProviderSettings>) -> Option<u64> {
    if !uses_reasoning_budget(model, settings) {
        return None;
    }

    Some(
        model
            .max_thinking_tokens
            .filter(|&tokens| tokens > 0)
            .unwrap_or(DEFAULT_HYBRID_REASONING_MODEL_THINKING_TOKENS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hybrid() -> ModelInfo {
        ModelInfo::new(64_000, 200_000).with_reasoning_budget()
    }

    #[test]
    fn test_required_budget_ignores_settings() {
        let model = ModelInfo::new(128_000, 200_000).with_required_reasoning_budget();
        assert!(uses_reasoning_budget(&model, None));
        assert!(uses_reasoning_budget(&model, Some(&ProviderSettings::default())));
    }

    #[test]
    fn test_supported_budget_needs_opt_in() {
        let model = hybrid();
        assert!(!uses_reasoning_budget(&model, None));
        assert!(!uses_reasoning_budget(&model, Some(&ProviderSettings::default())));

        let settings = ProviderSettings::default().with_reasoning_enabled();
        assert!(uses_reasoning_budget(&model, Some(&settings)));
    }

    #[test]
    fn test_opt_in_without_support() {
        let model = ModelInfo::new(8192, 128_000);
        let settings = ProviderSettings::default().with_reasoning_enabled();
        assert!(!uses_reasoning_budget(&model, Some(&settings)));
    }

    #[test]
    fn test_effort_from_user_choice() {
        let model = ModelInfo::new(100_000, 200_000).with_reasoning_effort_support();
        assert!(!uses_reasoning_effort(&model, None));

        let settings = ProviderSettings::default().with_reasoning_effort(ReasoningEffort::Low);
        assert!(uses_reasoning_effort(&model, Some(&settings)));
        assert_eq!(
            effective_reasoning_effort(&model, Some(&settings)),
            Some(ReasoningEffort::Low)
        );
    }

    #[test]
    fn test_forced_effort_applies_without_settings() {
        let model = ModelInfo::new(100_000, 200_000).with_forced_effort(ReasoningEffort::High);
        assert!(uses_reasoning_effort(&model, None));

        // user choice is ignored when the model does not accept one
        let settings = ProviderSettings::default().with_reasoning_effort(ReasoningEffort::Low);
        assert_eq!(
            effective_reasoning_effort(&model, Some(&settings)),
            Some(ReasoningEffort::High)
        );
    }

    #[test]
    fn test_budget_and_effort_are_independent() {
        let model = ModelInfo::new(64_000, 200_000)
            .with_required_reasoning_budget()
            .with_forced_effort(ReasoningEffort::Medium);
        assert!(uses_reasoning_budget(&model, None));
        assert!(uses_reasoning_effort(&model, None));
    }

    #[test]
    fn test_thinking_budget_defaults() {
        let settings = ProviderSettings::default().with_reasoning_enabled();
        assert_eq!(
            thinking_budget(&hybrid(), Some(&settings)),
            Some(DEFAULT_HYBRID_REASONING_MODEL_THINKING_TOKENS)
        );
        assert_eq!(thinking_budget(&hybrid(), None), None);

        let model = hybrid().with_thinking_tokens(24_000);
        assert_eq!(thinking_budget(&model, Some(&settings)), Some(24_000));
    }
}
