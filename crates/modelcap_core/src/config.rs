//! Settings loading.
//!
//! Provider settings live in `.modelcap/settings.json` by default. YAML and
//! TOML files are accepted too, picked by extension. Environment variables
//! override whatever the file says.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ModelError, ModelResult};
use crate::settings::ProviderSettings;

pub const ENV_API_PROVIDER: &str = "MODELCAP_API_PROVIDER";
pub const ENV_MODEL_ID: &str = "MODELCAP_MODEL_ID";
pub const ENV_MODEL_MAX_TOKENS: &str = "MODELCAP_MODEL_MAX_TOKENS";
pub const ENV_ENABLE_REASONING_EFFORT: &str = "MODELCAP_ENABLE_REASONING_EFFORT";
pub const ENV_REASONING_EFFORT: &str = "MODELCAP_REASONING_EFFORT";
pub const ENV_CLAUDE_CODE_MAX_OUTPUT_TOKENS: &str = "MODELCAP_CLAUDE_CODE_MAX_OUTPUT_TOKENS";

/// Default settings file under a workspace root.
pub fn default_settings_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(".modelcap").join("settings.json")
}

/// Parse a settings file, choosing the format from its extension.
pub fn load_settings_file(path: &Path) -> ModelResult<ProviderSettings> {
    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let settings = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => return Err(ModelError::UnsupportedSettingsFormat(path.to_path_buf())),
    };

    info!(path = %path.display(), "loaded provider settings");
    Ok(settings)
}

/// Apply overrides from a variable lookup.
///
/// Values that fail to parse are logged and skipped.
pub fn apply_overrides<F>(settings: &mut ProviderSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_API_PROVIDER) {
        match value.parse() {
            Ok(provider) => settings.api_provider = Some(provider),
            Err(e) => warn!(var = ENV_API_PROVIDER, "ignoring override: {}", e),
        }
    }

    if let Some(value) = lookup(ENV_MODEL_ID) {
        if !value.trim().is_empty() {
            settings.api_model_id = Some(value.trim().to_string());
        }
    }

    if let Some(value) = lookup(ENV_MODEL_MAX_TOKENS) {
        match value.trim().parse::<u64>() {
            Ok(tokens) => settings.model_max_tokens = Some(tokens),
            Err(e) => warn!(var = ENV_MODEL_MAX_TOKENS, "ignoring override: {}", e),
        }
    }

    if let Some(value) = lookup(ENV_ENABLE_REASONING_EFFORT) {
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => settings.enable_reasoning_effort = true,
            "0" | "false" | "no" | "off" => settings.enable_reasoning_effort = false,
            other => warn!(var = ENV_ENABLE_REASONING_EFFORT, value = other, "ignoring override"),
        }
    }

    if let Some(value) = lookup(ENV_REASONING_EFFORT) {
        match value.parse() {
            Ok(effort) => settings.reasoning_effort = Some(effort),
            Err(e) => warn!(var = ENV_REASONING_EFFORT, "ignoring override: {}", e),
        }
    }

    if let Some(value) = lookup(ENV_CLAUDE_CODE_MAX_OUTPUT_TOKENS) {
        match value.trim().parse::<u64>() {
            Ok(tokens) => settings.claude_code_max_output_tokens = Some(tokens),
            Err(e) => warn!(var = ENV_CLAUDE_CODE_MAX_OUTPUT_TOKENS, "ignoring override: {}", e),
        }
    }
}

/// Load settings from `path` (or the workspace default) and apply environment overrides.
///
/// An explicit path must exist. A missing default file yields default settings.
pub fn load_settings(workspace_root: &Path, path: Option<&Path>) -> ModelResult<ProviderSettings> {
    let mut settings = match path {
        Some(path) => load_settings_file(path)?,
        None => {
            let default_path = default_settings_path(workspace_root);
            if default_path.exists() {
                load_settings_file(&default_path)?
            } else {
                debug!(path = %default_path.display(), "no settings file, using defaults");
                ProviderSettings::default()
            }
        }
    };

    apply_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}
