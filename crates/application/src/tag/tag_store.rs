use std::sync::Arc;

use tracing::{debug, error, info, warn};

use domain::DomainError;
use domain::tag::{
    AdditionReport, PhoneNumber, Registry, RegistryRepository, RemovalReport, RenameReport, TagName,
};

/// Owns the tag registry and flushes it after every mutation
///
/// Mutation success is defined by the in-memory change. A failed flush is
/// logged and leaves the in-memory state as is, so a crash before the next
/// successful flush loses those changes.
pub struct TagStore {
    registry: Registry,
    repository: Arc<dyn RegistryRepository>,
}

impl TagStore {
    /// Load the registry from `repository`, starting empty when nothing usable is stored
    pub async fn open(repository: Arc<dyn RegistryRepository>) -> Self {
        let registry = match repository.load().await {
            Ok(Some(mut registry)) => {
                let repeated = registry.dedupe_members();
                if repeated > 0 {
                    warn!(repeated, "Dropped repeated members from stored registry");
                }
                let pruned = registry.prune_empty();
                if pruned > 0 {
                    warn!(pruned, "Dropped empty tags from stored registry");
                }
                info!(tags = registry.len(), "📋 Loaded tag registry");
                registry
            }
            Ok(None) => {
                info!("No stored registry found, starting empty");
                Registry::new()
            }
            Err(e) => {
                error!(error = %e, "Failed to load tag registry, starting empty");
                Registry::new()
            }
        };

        Self {
            registry,
            repository,
        }
    }

    pub fn get(&self, tag: &TagName) -> Option<&[PhoneNumber]> {
        self.registry.get(tag)
    }

    /// Tag addressed by a `tag<name>!` invocation, with its members
    pub fn resolve(&self, requested: &TagName) -> Option<(&TagName, &[PhoneNumber])> {
        self.registry.resolve(requested)
    }

    /// Tag names with member counts
    pub fn tags(&self) -> Vec<(TagName, usize)> {
        self.registry.summary()
    }

    pub async fn add_members(&mut self, tag: &TagName, candidates: &[String]) -> AdditionReport {
        let report = self.registry.add_members(tag, candidates);
        if report.changed() {
            self.persist().await;
        }
        report
    }

    pub async fn remove_members(
        &mut self,
        tag: &TagName,
        candidates: &[String],
    ) -> Result<RemovalReport, DomainError> {
        let report = self.registry.remove_members(tag, candidates)?;
        if report.changed() {
            self.persist().await;
        }
        Ok(report)
    }

    pub async fn rename(&mut self, old: &TagName, new: &TagName) -> Result<RenameReport, DomainError> {
        let report = self.registry.rename(old, new)?;
        self.persist().await;
        Ok(report)
    }

    async fn persist(&self) {
        match self.repository.save(&self.registry).await {
            Ok(()) => debug!(tags = self.registry.len(), "💾 Registry flushed"),
            Err(e) => {
                warn!(error = %e, "Failed to persist tag registry, keeping in-memory changes")
            }
        }
    }
}
