pub mod logging;
pub mod vec2;

pub use logging::{init_console_logger, init_file_logger, ConsoleLogger, FileLogger, LogLevel};
pub use vec2::Vec2;

// Re-export log crate so downstream crates can use ergo_base::log::*
pub use log;
