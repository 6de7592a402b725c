#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod middleware;
pub mod platform;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod test_support;
pub mod web;

// Re-exports for public API
pub use app::build_app;
pub use config::AppConfig;
pub use error::AppError;
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use platform::{select_platform, Platform};
pub use state::app_state::AppState;
pub use store::{DataStore, MemoryStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    flashcards_test_support::logging::init();
}
