use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::{DataStore, StoreError};
use crate::domain::Deck;

pub const DEFAULT_AUTHOR_KEY: &str = "guessme";

/// Process-local store used for local runs and tests.
#[derive(Debug)]
pub struct MemoryStore {
    decks: RwLock<HashMap<String, Deck>>,
    author_key: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_author_key(DEFAULT_AUTHOR_KEY)
    }

    pub fn with_author_key(author_key: impl Into<String>) -> Self {
        Self {
            decks: RwLock::new(HashMap::new()),
            author_key: author_key.into(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    fn summary(&self) -> String {
        "MemoryStore".to_string()
    }

    async fn get_deck(&self, id: &str) -> Result<Option<Deck>, StoreError> {
        Ok(self.decks.read().get(id).cloned())
    }

    async fn put_deck(&self, id: &str, deck: &Deck) -> Result<(), StoreError> {
        debug!(deck_id = id, cards = deck.cards.len(), "storing deck");
        self.decks.write().insert(id.to_string(), deck.clone());
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.decks.read().is_empty())
    }

    async fn is_valid_author(&self, key: &str) -> Result<bool, StoreError> {
        Ok(!self.author_key.is_empty() && key.trim() == self.author_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Card;

    #[tokio::test]
    async fn missing_deck_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_deck("NOPE").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_get_round_trips_cards() {
        let store = MemoryStore::new();
        let mut deck = Deck::new("D1", "Deck");
        let card_id = deck.add_card(Card::new("Q", "A", "H"));

        store.put_deck("D1", &deck).await.unwrap();
        let loaded = store.get_deck("D1").await.unwrap().unwrap();

        assert_eq!(loaded, deck);
        assert_eq!(loaded.card(&card_id), deck.card(&card_id));
    }

    #[tokio::test]
    async fn put_replaces_whole_deck() {
        let store = MemoryStore::new();
        let mut deck = Deck::new("D1", "First");
        deck.add_card(Card::new("Q", "A", ""));
        store.put_deck("D1", &deck).await.unwrap();

        store.put_deck("D1", &Deck::new("D1", "Second")).await.unwrap();
        let loaded = store.get_deck("D1").await.unwrap().unwrap();
        assert_eq!(loaded.title, "Second");
        assert!(loaded.cards.is_empty());
    }

    #[tokio::test]
    async fn emptiness_tracks_contents() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await.unwrap());
        store.put_deck("D1", &Deck::new("D1", "Deck")).await.unwrap();
        assert!(!store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn author_key_validation() {
        let store = MemoryStore::new();
        assert!(store.is_valid_author("guessme").await.unwrap());
        assert!(store.is_valid_author(" guessme ").await.unwrap());
        assert!(!store.is_valid_author("badkey").await.unwrap());
        assert!(!store.is_valid_author("").await.unwrap());

        let custom = MemoryStore::with_author_key("s3cret");
        assert!(custom.is_valid_author("s3cret").await.unwrap());
        assert!(!custom.is_valid_author("guessme").await.unwrap());
    }
}
