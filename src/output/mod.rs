pub mod formatters;
pub mod senders;

pub use formatters::{formatter_for, ConsoleFormatter, JsonFormatter, ReportFormatter};
pub use senders::{ConsoleSender, FileSender, ReportSender};
