pub mod console_transport;

pub use console_transport::{JsonLineReplySender, read_messages};
