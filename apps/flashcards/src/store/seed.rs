use tracing::{debug, info};

use super::{DataStore, StoreError};
use crate::domain::{Card, Deck};

pub const DEMO_DECK_ID: &str = "TEST-CODE";
pub const DEMO_DECK_TITLE: &str = "Test flashcard deck";

const MARKDOWN_ANSWER: &str = "Some features do, including...

* Bulleted lists
* **Bold**
* _Italics_

1. Numbered
2. Lists
3. Also
4. Work

But [links](http://some.bad.site/) are disabled";

/// The deck every local instance starts with.
pub fn demo_deck() -> Deck {
    let mut deck = Deck::new(DEMO_DECK_ID, DEMO_DECK_TITLE);

    deck.add_card(Card::new(
        "What Is the airspeed velocity of an unladen swallow?",
        "What do you mean? African or European swallow?",
        "Question",
    ));
    deck.add_card(Card::new("What is the meaning of life?", "42", "Number"));
    deck.add_card(Card::new(
        "Should I stay or should I go?",
        "If I stay there will be trouble",
        "Clash",
    ));
    deck.add_card(Card::new(
        "How much wood would a woodchuck chuck if a woodchuck could chuck wood?",
        "Much wood would be chucked",
        "",
    ));
    deck.add_card(Card::new(
        "Does `Markdown` work?",
        MARKDOWN_ANSWER,
        "Formatting",
    ));

    deck
}

/// Store the demo deck unless the store already holds data.
///
/// Returns whether anything was written.
pub async fn seed_demo_deck(store: &dyn DataStore) -> Result<bool, StoreError> {
    if !store.is_empty().await? {
        debug!("store is not empty, skipping demo data");
        return Ok(false);
    }

    let deck = demo_deck();
    store.put_deck(&deck.id, &deck).await?;
    info!(store = %store.summary(), deck_id = %deck.id, "demo data created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeds_empty_store_once() {
        let store = MemoryStore::new();
        assert!(seed_demo_deck(&store).await.unwrap());
        assert!(!seed_demo_deck(&store).await.unwrap());

        let deck = store.get_deck(DEMO_DECK_ID).await.unwrap().unwrap();
        assert_eq!(deck.title, DEMO_DECK_TITLE);
        assert_eq!(deck.cards.len(), 5);
    }

    #[tokio::test]
    async fn leaves_populated_store_alone() {
        let store = MemoryStore::new();
        store.put_deck("OTHER", &Deck::new("OTHER", "Mine")).await.unwrap();

        assert!(!seed_demo_deck(&store).await.unwrap());
        assert!(store.get_deck(DEMO_DECK_ID).await.unwrap().is_none());
    }
}
