use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use domain::DomainError;
use domain::tag::{Registry, RegistryRepository};
use tokio::sync::Mutex;

/// Keeps the "persisted" registry in memory; handy for tests and dry runs
#[derive(Clone, Default)]
pub struct InMemoryRegistryRepository {
    pub saved: Arc<Mutex<Option<Registry>>>,
    fail_saves: Arc<AtomicBool>,
    save_count: Arc<AtomicUsize>,
}

impl InMemoryRegistryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            saved: Arc::new(Mutex::new(Some(registry))),
            ..Default::default()
        }
    }

    /// Make every following save fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Option<Registry> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl RegistryRepository for InMemoryRegistryRepository {
    async fn load(&self) -> Result<Option<Registry>, DomainError> {
        Ok(self.saved.lock().await.clone())
    }

    async fn save(&self, registry: &Registry) -> Result<(), DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("simulated write failure".to_string()));
        }
        *self.saved.lock().await = Some(registry.clone());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
