//! Deck and card records.
//!
//! Field names are serialized in the casing used by the stored documents
//! (`ID`, `DeckID`, `Title`, ...), so the same types flow through the
//! document store and into page templates unchanged.

use std::collections::HashMap;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use super::errors::DomainError;

/// A single question/answer/hint triple belonging to one deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "DeckID", default)]
    pub deck_id: String,
    #[serde(rename = "Question", default)]
    pub question: String,
    #[serde(rename = "Answer", default)]
    pub answer: String,
    #[serde(rename = "Hint", default)]
    pub hint: String,
}

impl Card {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            hint: hint.into(),
            ..Self::default()
        }
    }
}

/// A named collection of cards, keyed by card id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Cards", default, deserialize_with = "null_as_empty")]
    pub cards: HashMap<String, Card>,
}

impl Deck {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cards: HashMap::new(),
        }
    }

    /// Add a card, assigning a fresh id when the card has none.
    ///
    /// Returns the id the card was stored under.
    pub fn add_card(&mut self, mut card: Card) -> String {
        if card.id.is_empty() {
            card.id = random_card_id();
        }
        let id = card.id.clone();
        self.put_card(&id, card);
        id
    }

    /// Insert or replace the card stored under `card_id`.
    ///
    /// The card's own id is forced to `card_id` and an empty deck id is
    /// back-filled, so map keys and card ids never disagree.
    pub fn put_card(&mut self, card_id: &str, mut card: Card) {
        if card.deck_id.is_empty() {
            card.deck_id = self.id.clone();
        }
        card.id = card_id.to_string();
        self.cards.insert(card_id.to_string(), card);
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.get(card_id)
    }

    pub fn random_card(&self) -> Result<&Card, DomainError> {
        self.cards
            .values()
            .choose(&mut rand::rng())
            .ok_or_else(|| DomainError::EmptyDeck(self.id.clone()))
    }

    /// Cards ordered by question text, for stable page rendering.
    pub fn sorted_cards(&self) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.values().collect();
        cards.sort_by(|a, b| a.question.cmp(&b.question).then_with(|| a.id.cmp(&b.id)));
        cards
    }
}

/// Generate a deck id of the form `XXXX-XXXX` (upper-case hex).
pub fn random_deck_id() -> String {
    let mut rng = rand::rng();
    format!(
        "{:04X}-{:04X}",
        rng.random_range(0..=0xFFFF_u32),
        rng.random_range(0..=0xFFFF_u32)
    )
}

/// Generate an 8 digit upper-case hex card id.
pub fn random_card_id() -> String {
    format!("{:08X}", rand::rng().random_range(0..=0xFFFF_FFFF_u32))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, Card>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, Card>>::deserialize(deserializer)?.unwrap_or_default())
}
