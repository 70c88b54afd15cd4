//! Router model cache.
//!
//! Routers publish their model lists at runtime. Fetched lists are kept in
//! a JSON file so lookups work offline until the cache goes stale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ModelError, ModelResult};
use crate::info::ModelInfo;
use crate::router::RouterName;

/// Models keyed by model id.
pub type ModelRecord = BTreeMap<String, ModelInfo>;

/// Model records per router, with the time they were last refreshed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterModels {
    #[serde(default)]
    pub routers: BTreeMap<RouterName, ModelRecord>,
    pub last_updated: DateTime<Utc>,
}

impl Default for RouterModels {
    fn default() -> Self {
        Self {
            routers: BTreeMap::new(),
            last_updated: Utc::now(),
        }
    }
}

impl RouterModels {
    /// Replace a router's models and bump the timestamp.
    pub fn insert(&mut self, router: RouterName, models: ModelRecord) {
        self.routers.insert(router, models);
        self.last_updated = Utc::now();
    }

    pub fn models_for(&self, router: RouterName) -> Option<&ModelRecord> {
        self.routers.get(&router)
    }

    pub fn find_model(&self, router: RouterName, model_id: &str) -> Option<&ModelInfo> {
        self.routers.get(&router)?.get(model_id)
    }

    /// Like [`find_model`](Self::find_model), but reports what was missing.
    pub fn require_model(&self, router: RouterName, model_id: &str) -> ModelResult<&ModelInfo> {
        self.find_model(router, model_id)
            .ok_or_else(|| ModelError::UnknownModel {
                provider: router.to_string(),
                model: model_id.to_string(),
            })
    }

    pub fn is_stale(&self, max_age_hours: i64) -> bool {
        let age = Utc::now() - self.last_updated;
        age.num_hours() >= max_age_hours
    }
}

/// File-backed store for [`RouterModels`].
pub struct RouterModelsCache {
    path: PathBuf,
}

impl RouterModelsCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache at the conventional location under a workspace root.
    pub fn in_workspace(workspace_root: &Path) -> Self {
        Self::new(workspace_root.join(".modelcap").join("router-models.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache regardless of age. A missing file is `Ok(None)`.
    pub fn load(&self) -> ModelResult<Option<RouterModels>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "router model cache not found");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let models: RouterModels = serde_json::from_str(&content)?;
        Ok(Some(models))
    }

    /// Read the cache only if it is younger than `max_age_hours`.
    pub fn load_fresh(&self, max_age_hours: i64) -> ModelResult<Option<RouterModels>> {
        match self.load()? {
            Some(models) if models.is_stale(max_age_hours) => {
                debug!(
                    path = %self.path.display(),
                    last_updated = %models.last_updated,
                    "router model cache is stale"
                );
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub fn save(&self, models: &RouterModels) -> ModelResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(models)?;
        std::fs::write(&self.path, content)?;

        info!(path = %self.path.display(), routers = models.routers.len(), "saved router model cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_record() -> ModelRecord {
        let mut record = ModelRecord::new();
        record.insert(
            "anthropic/claude-sonnet-4".to_string(),
            ModelInfo::new(64_000, 200_000).with_reasoning_budget(),
        );
        record.insert("openai/gpt-4o".to_string(), ModelInfo::new(16_384, 128_000));
        record
    }

    #[test]
    fn test_find_model() {
        let mut models = RouterModels::default();
        models.insert(RouterName::OpenRouter, sample_record());

        assert!(models.find_model(RouterName::OpenRouter, "openai/gpt-4o").is_some());
        assert!(models.find_model(RouterName::Requesty, "openai/gpt-4o").is_none());
        assert!(matches!(
            models.require_model(RouterName::OpenRouter, "missing"),
            Err(ModelError::UnknownModel { .. })
        ));
    }

    #[test]
    fn test_staleness() {
        let mut models = RouterModels::default();
        assert!(!models.is_stale(24));

        models.last_updated = Utc::now() - Duration::hours(25);
        assert!(models.is_stale(24));
    }

    #[test]
    fn test_serialized_router_keys() {
        let mut models = RouterModels::default();
        models.insert(RouterName::KilocodeOpenRouter, sample_record());

        let value = serde_json::to_value(&models).unwrap();
        assert!(value["routers"]["kilocode-openrouter"]["openai/gpt-4o"].is_object());
        assert!(value["lastUpdated"].is_string());
    }
}
