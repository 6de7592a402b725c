//! Deck persistence.
//!
//! Decks are stored whole, keyed by deck id. Writers always replace the full
//! document (read-modify-write, last writer wins).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Deck;

pub mod firestore;
pub mod memory;
pub mod seed;

pub use firestore::{FirestoreConfig, FirestoreStore};
pub use memory::MemoryStore;
pub use seed::seed_demo_deck;

/// Failures talking to a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("could not decode stored document: {0}")]
    Decode(String),
    #[error("could not obtain access token: {0}")]
    Auth(String),
}

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Short human-readable description for startup logs.
    fn summary(&self) -> String;

    async fn get_deck(&self, id: &str) -> Result<Option<Deck>, StoreError>;

    async fn put_deck(&self, id: &str, deck: &Deck) -> Result<(), StoreError>;

    async fn is_empty(&self) -> Result<bool, StoreError>;

    /// Whether `key` may create new decks.
    async fn is_valid_author(&self, key: &str) -> Result<bool, StoreError>;
}
