//! Routing backends and their model-listing options.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};

/// A backend that serves many upstream models behind one API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouterName {
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "requesty")]
    Requesty,
    #[serde(rename = "glama")]
    Glama,
    #[serde(rename = "unbound")]
    Unbound,
    #[serde(rename = "litellm")]
    LiteLlm,
    #[serde(rename = "kilocode-openrouter")]
    KilocodeOpenRouter,
    #[serde(rename = "ollama")]
    Ollama,
    #[serde(rename = "lmstudio")]
    LmStudio,
}

impl RouterName {
    pub const ALL: [RouterName; 8] = [
        Self::OpenRouter,
        Self::Requesty,
        Self::Glama,
        Self::Unbound,
        Self::LiteLlm,
        Self::KilocodeOpenRouter,
        Self::Ollama,
        Self::LmStudio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenRouter => "openrouter",
            Self::Requesty => "requesty",
            Self::Glama => "glama",
            Self::Unbound => "unbound",
            Self::LiteLlm => "litellm",
            Self::KilocodeOpenRouter => "kilocode-openrouter",
            Self::Ollama => "ollama",
            Self::LmStudio => "lmstudio",
        }
    }

    /// Whether the router runs on the user's machine.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Ollama | Self::LmStudio)
    }
}

impl std::fmt::Display for RouterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RouterName {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        RouterName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ModelError::InvalidRouterName(s.to_string()))
    }
}

/// Check whether a string names a known router.
pub fn is_router_name(value: &str) -> bool {
    value.parse::<RouterName>().is_ok()
}

/// Narrow an optional string to a [`RouterName`].
///
/// Absent input is rejected the same way as an unknown name.
pub fn to_router_name(value: Option<&str>) -> ModelResult<RouterName> {
    match value {
        Some(name) => name.parse(),
        None => Err(ModelError::InvalidRouterName(String::new())),
    }
}

/// Options for listing the models a backend serves, keyed by provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "provider")]
pub enum GetModelsOptions {
    #[serde(rename = "openrouter")]
    OpenRouter {
        #[serde(default, rename = "apiKey", skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
        #[serde(default, rename = "baseUrl", skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    #[serde(rename = "glama")]
    Glama,
    #[serde(rename = "requesty")]
    Requesty {
        #[serde(default, rename = "apiKey", skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
    },
    #[serde(rename = "unbound")]
    Unbound {
        #[serde(default, rename = "apiKey", skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
    },
    #[serde(rename = "litellm")]
    LiteLlm {
        #[serde(rename = "apiKey")]
        api_key: String,
        #[serde(rename = "baseUrl")]
        base_url: String,
    },
    #[serde(rename = "kilocode-openrouter")]
    KilocodeOpenRouter {
        #[serde(default, rename = "kilocodeToken", skip_serializing_if = "Option::is_none")]
        kilocode_token: Option<String>,
    },
    #[serde(rename = "cerebras")]
    Cerebras {
        #[serde(default, rename = "cerebrasApiKey", skip_serializing_if = "Option::is_none")]
        cerebras_api_key: Option<String>,
    },
    #[serde(rename = "ollama")]
    Ollama {
        #[serde(default, rename = "baseUrl", skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    #[serde(rename = "lmstudio")]
    LmStudio {
        #[serde(default, rename = "baseUrl", skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
}

impl GetModelsOptions {
    /// The `provider` tag.
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::OpenRouter { .. } => "openrouter",
            Self::Glama => "glama",
            Self::Requesty { .. } => "requesty",
            Self::Unbound { .. } => "unbound",
            Self::LiteLlm { .. } => "litellm",
            Self::KilocodeOpenRouter { .. } => "kilocode-openrouter",
            Self::Cerebras { .. } => "cerebras",
            Self::Ollama { .. } => "ollama",
            Self::LmStudio { .. } => "lmstudio",
        }
    }

    /// The router these options list models for. Cerebras is not a router.
    pub fn router_name(&self) -> Option<RouterName> {
        self.provider_name().parse().ok()
    }

    pub fn base_url(&self) -> Option<&str> {
        match self {
            Self::OpenRouter { base_url, .. }
            | Self::Ollama { base_url }
            | Self::LmStudio { base_url } => base_url.as_deref(),
            Self::LiteLlm { base_url, .. } => Some(base_url.as_str()),
            _ => None,
        }
    }

    /// Check that required credentials are present.
    pub fn validate(&self) -> ModelResult<()> {
        if let Self::LiteLlm { api_key, base_url } = self {
            if api_key.trim().is_empty() {
                return Err(self.missing("apiKey"));
            }
            if base_url.trim().is_empty() {
                return Err(self.missing("baseUrl"));
            }
        }
        Ok(())
    }

    fn missing(&self, field: &str) -> ModelError {
        ModelError::MissingOption {
            provider: self.provider_name().to_string(),
            field: field.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_router_name_accepts_known() {
        assert_eq!(to_router_name(Some("ollama")).unwrap(), RouterName::Ollama);
        assert_eq!(
            to_router_name(Some("kilocode-openrouter")).unwrap(),
            RouterName::KilocodeOpenRouter
        );
        for name in RouterName::ALL {
            assert_eq!(to_router_name(Some(name.as_str())).unwrap(), name);
        }
    }

    #[test]
    fn test_to_router_name_rejects_unknown() {
        match to_router_name(Some("bogus")) {
            Err(ModelError::InvalidRouterName(value)) => assert_eq!(value, "bogus"),
            other => panic!("expected InvalidRouterName, got {:?}", other),
        }
        // exact match only
        assert!(to_router_name(Some("Ollama")).is_err());
        assert!(to_router_name(Some("")).is_err());
    }

    #[test]
    fn test_to_router_name_rejects_missing() {
        assert!(matches!(
            to_router_name(None),
            Err(ModelError::InvalidRouterName(_))
        ));
    }

    #[test]
    fn test_is_router_name() {
        assert!(is_router_name("lmstudio"));
        assert!(!is_router_name("cerebras"));
    }

    #[test]
    fn test_options_tagged_deserialize() {
        let json = r#"{"provider":"litellm","apiKey":"sk-1","baseUrl":"http://localhost:4000"}"#;
        let options: GetModelsOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.router_name(), Some(RouterName::LiteLlm));
        assert_eq!(options.base_url(), Some("http://localhost:4000"));
        assert!(options.validate().is_ok());

        let glama: GetModelsOptions = serde_json::from_str(r#"{"provider":"glama"}"#).unwrap();
        assert_eq!(glama, GetModelsOptions::Glama);
    }

    #[test]
    fn test_litellm_requires_credentials() {
        let json = r#"{"provider":"litellm","baseUrl":"http://localhost:4000"}"#;
        assert!(serde_json::from_str::<GetModelsOptions>(json).is_err());

        let options = GetModelsOptions::LiteLlm {
            api_key: " ".to_string(),
            base_url: "http://localhost:4000".to_string(),
        };
        assert!(matches!(
            options.validate(),
            Err(ModelError::MissingOption { field, .. }) if field == "apiKey"
        ));
    }

    #[test]
    fn test_cerebras_is_not_a_router() {
        let options = GetModelsOptions::Cerebras {
            cerebras_api_key: None,
        };
        assert_eq!(options.provider_name(), "cerebras");
        assert_eq!(options.router_name(), None);
    }
}
