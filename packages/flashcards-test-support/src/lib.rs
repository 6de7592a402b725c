//! Shared helpers for the flashcards test suites.
//!
//! Provides idempotent test logging and a log capture buffer for asserting
//! on emitted events.

pub mod capture;
pub mod logging;

pub use capture::CapturedLogs;
