//! Recently viewed decks, remembered in a cookie.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use tracing::debug;

pub const HISTORY_COOKIE: &str = "deckHistory";

/// Most decks remembered at once.
pub const MAX_HISTORY: usize = 4;

const SEPARATOR: char = '|';

/// Deck ids, most recent first, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn from_request(req: &HttpRequest) -> Self {
        let history = req
            .cookie(HISTORY_COOKIE)
            .map(|cookie| Self::parse(cookie.value()))
            .unwrap_or_default();
        debug!(entries = ?history.entries, "loaded history");
        history
    }

    pub fn parse(value: &str) -> Self {
        let mut history = Self::default();
        for entry in value.split(SEPARATOR).map(str::trim).rev() {
            if !entry.is_empty() {
                history.push(entry);
            }
        }
        history
    }

    /// Put `deck_id` at the front, dropping any older copy and the
    /// oldest entries beyond `MAX_HISTORY`.
    pub fn push(&mut self, deck_id: &str) {
        self.entries.retain(|entry| entry != deck_id);
        self.entries.insert(0, deck_id.to_string());
        self.entries.truncate(MAX_HISTORY);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build(HISTORY_COOKIE, self.entries.join("|"))
            .path("/")
            .secure(true)
            .same_site(SameSite::Strict)
            .finish()
    }
}
