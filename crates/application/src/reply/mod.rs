pub mod formatter;

pub use formatter::ReplyFormatter;
