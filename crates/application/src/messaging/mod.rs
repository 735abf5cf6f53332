pub mod command_listener;
pub mod dispatcher;

pub use command_listener::CommandListener;
pub use dispatcher::CommandDispatcher;
