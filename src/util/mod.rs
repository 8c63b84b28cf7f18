//! Utility modules for newsjudge

pub mod logging;

pub use logging::{init_logging, parse_level, resolve_level, LoggingConfig};
