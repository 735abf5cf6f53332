pub mod json_registry_repository;
pub mod memory_registry_repository;

pub use json_registry_repository::JsonRegistryRepository;
pub use memory_registry_repository::InMemoryRegistryRepository;
