/*
[INPUT]:  Public API exports for binance-futures-bot crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

// Re-export main types for convenience
pub use cli::{Cli, OrderCommand};
pub use config::BotConfig;
pub use logging::init_tracing;
