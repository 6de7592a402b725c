pub mod cards;
pub mod errors;

pub use cards::{random_card_id, random_deck_id, Card, Deck};
pub use errors::DomainError;
