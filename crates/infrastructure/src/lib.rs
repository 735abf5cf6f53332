//! Infrastructure layer - External integrations

pub mod config;
pub mod messaging;
pub mod repositories;
pub mod roster;

pub use messaging::JsonLineReplySender;
pub use repositories::{InMemoryRegistryRepository, JsonRegistryRepository};
pub use roster::StaticGroupRoster;
