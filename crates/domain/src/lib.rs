//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Value Objects (PhoneNumber, TagName)
//! - The tag Registry aggregate and its repository interface
//! - Chat commands and their parser
//! - Ports to the chat transport (roster, reply sender)
//!
//! Principles:
//! - No I/O; persistence and transport live behind traits
//! - Registry invariants enforced at domain level
//! - Testable in isolation

pub mod command;
pub mod error;
pub mod messaging;
pub mod roster;
pub mod tag;

// Re-export commonly used types
pub use command::{Command, CommandKind, CommandParser, UsageTopic};
pub use error::{CollaboratorError, DomainError};
pub use messaging::{InboundMessage, Reply, ReplySender};
pub use roster::{GroupRoster, Participant, ParticipantRole};
pub use tag::{PhoneNumber, Registry, RegistryRepository, TagName};
