use crate::DomainError;
use crate::tag::Registry;
use async_trait::async_trait;

/// Repository interface for registry persistence
///
/// The registry is always read and written as a whole. Implementations
/// should be provided in the infrastructure layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryRepository: Send + Sync {
    /// Load the persisted registry, `None` when nothing was stored yet
    async fn load(&self) -> Result<Option<Registry>, DomainError>;

    /// Replace the persisted registry with `registry`
    async fn save(&self, registry: &Registry) -> Result<(), DomainError>;
}
