//! Domain-level error type for deck and card operations.
//!
//! HTTP-agnostic. The `/random` handler turns an empty deck into a redirect
//! to the deck page.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("deck {0} has no cards")]
    EmptyDeck(String),
}
