use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

use anyhow::Context;
use async_trait::async_trait;

use crate::{model::config::Settings, ConfigStore};

/// Config kept in memory and rewritten to a JSON file on every save.
pub struct JsonFileConfig {
    path: PathBuf,
    settings: RwLock<Settings>,
}

impl JsonFileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::info!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("can't read config {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("can't parse config {}", path.display()))?;
        Ok(JsonFileConfig {
            path: path.to_path_buf(),
            settings: RwLock::new(settings),
        })
    }
}

#[async_trait]
impl ConfigStore for JsonFileConfig {
    async fn get(&self) -> anyhow::Result<Settings> {
        let settings = self
            .settings
            .read()
            .map_err(|e| anyhow::anyhow!("Locking error: {:?}", e))?;
        Ok(settings.clone())
    }

    async fn save(&self, settings: Settings) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(&settings)?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("can't write config {}", self.path.display()))?;
        let mut current = self
            .settings
            .write()
            .map_err(|e| anyhow::anyhow!("Locking error: {:?}", e))?;
        *current = settings;
        tracing::info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
