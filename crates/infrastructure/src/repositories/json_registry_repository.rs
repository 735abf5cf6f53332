use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use domain::DomainError;
use domain::tag::{Registry, RegistryRepository};
use tracing::debug;

/// Stores the registry as one human-readable JSON object on disk
///
/// The whole file is rewritten on every save: the new content goes to a
/// sibling temp file first and is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonRegistryRepository {
    path: PathBuf,
}

impl JsonRegistryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "registry.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read(&self) -> Result<Option<Registry>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        let registry = serde_json::from_str::<Registry>(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(registry))
    }

    async fn write(&self, registry: &Registry) -> Result<()> {
        let payload =
            serde_json::to_string_pretty(registry).context("failed to serialize registry")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, payload.as_bytes())
            .await
            .with_context(|| format!("failed to write {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), tags = registry.len(), "Registry written");
        Ok(())
    }
}

#[async_trait]
impl RegistryRepository for JsonRegistryRepository {
    async fn load(&self) -> Result<Option<Registry>, DomainError> {
        self.read()
            .await
            .map_err(|e| DomainError::Storage(format!("{:#}", e)))
    }

    async fn save(&self, registry: &Registry) -> Result<(), DomainError> {
        self.write(registry)
            .await
            .map_err(|e| DomainError::Storage(format!("{:#}", e)))
    }
}
