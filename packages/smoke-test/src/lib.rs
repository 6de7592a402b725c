//! Step-driven smoke tests for a running flashcards site.
//!
//! A script is a plain-text list of `Feature:`, `Scenario:` and
//! `Given`/`When`/`Then`/`And` lines. Each step sentence is matched against
//! registered patterns, where backtick-quoted words are placeholders whose
//! values are handed to the step handler.

pub mod error;
pub mod flashcard_steps;
pub mod page;
pub mod registry;
pub mod runner;
pub mod step;
pub mod suite;

pub use error::{RunError, StepError};
pub use flashcard_steps::{register_flashcard_steps, Site};
pub use registry::{StepContext, StepRegistry};
pub use runner::run_script;
pub use step::{parse_step, ParsedStep};
pub use suite::{RunSummary, ScenarioStatus, SuiteState};

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    flashcards_test_support::logging::init();
}
