//! Application layer - Use cases and business workflows

pub mod authorization;
pub mod messaging;
pub mod reply;
pub mod roster;
pub mod tag;

pub use authorization::AuthorizationGate;
pub use messaging::{CommandDispatcher, CommandListener};
pub use reply::ReplyFormatter;
pub use tag::TagStore;
