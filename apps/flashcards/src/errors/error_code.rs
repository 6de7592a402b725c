//! User-facing error codes.
//!
//! The numeric codes travel in `/error?code=NNNN` redirects and are looked
//! up again by the error page. Add new codes here; never pass ad-hoc strings.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Catch-all
    UnknownError,
    /// Deck id does not exist in the store
    DeckNotFound,
    /// Card id does not exist in the deck
    CardNotFound,
    /// Author key rejected on deck creation
    NotAuthorised,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 4] = [
        ErrorCode::UnknownError,
        ErrorCode::DeckNotFound,
        ErrorCode::CardNotFound,
        ErrorCode::NotAuthorised,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownError => "1001",
            Self::DeckNotFound => "2001",
            Self::CardNotFound => "2002",
            Self::NotAuthorised => "3001",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::UnknownError => "Unknown error",
            Self::DeckNotFound => "Deck not found",
            Self::CardNotFound => "Card not found",
            Self::NotAuthorised => "Not authorised to create new decks",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Location of the error page for this code.
    pub fn error_page(self) -> String {
        format!("/error?code={}", self.as_str())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message shown on the error page for a raw code from the query string.
pub fn error_text(code: &str) -> String {
    match ErrorCode::from_code(code) {
        Some(known) => known.message().to_string(),
        None => format!("Unknown error {code}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<&str> = ErrorCode::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn known_codes_round_trip() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_code(code.as_str()), Some(code));
        }
    }

    #[test]
    fn error_text_uses_table() {
        assert_eq!(error_text("1001"), "Unknown error");
        assert_eq!(error_text("2001"), "Deck not found");
        assert_eq!(error_text("2002"), "Card not found");
        assert_eq!(error_text("3001"), "Not authorised to create new decks");
    }

    #[test]
    fn error_text_synthesizes_unknown_codes() {
        assert_eq!(error_text("9999"), "Unknown error 9999");
        assert_eq!(error_text(""), "Unknown error ");
    }

    #[test]
    fn error_page_location() {
        assert_eq!(ErrorCode::DeckNotFound.error_page(), "/error?code=2001");
    }
}
