/*
[INPUT]:  Public API exports for eventdesk-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod render;
pub mod session;

// Re-export main types for convenience
pub use config::AppConfig;
pub use session::SessionFile;
