mod model;
mod parser;

pub use model::{Command, CommandKind, UsageTopic};
pub use parser::CommandParser;
