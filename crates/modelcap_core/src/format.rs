//! Outbound request wire formats.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};

/// Shape a request will be serialized into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApiFormat {
    Anthropic,
    OpenAi,
    Gemini,
    OpenRouter,
}

impl ApiFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
        }
    }
}

impl std::fmt::Display for ApiFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApiFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "openrouter" => Ok(Self::OpenRouter),
            _ => Err(ModelError::InvalidFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("openai".parse::<ApiFormat>().unwrap(), ApiFormat::OpenAi);
        assert_eq!("OpenRouter".parse::<ApiFormat>().unwrap(), ApiFormat::OpenRouter);
        assert!(matches!(
            "bedrock".parse::<ApiFormat>(),
            Err(ModelError::InvalidFormat(value)) if value == "bedrock"
        ));
    }

    #[test]
    fn test_format_serde_matches_display() {
        for format in [
            ApiFormat::Anthropic,
            ApiFormat::OpenAi,
            ApiFormat::Gemini,
            ApiFormat::OpenRouter,
        ] {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{}\"", format));
        }
    }
}
