use std::path::Path;

use actix_files::Files;
use actix_web::http::header;
use actix_web::{web, HttpResponse};

use crate::domain::Deck;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub mod cards;
pub mod decks;
pub mod pages;

/// Register every page route.
///
/// Static assets are mounted separately with [`static_files`] because their
/// directory is only known once the templates have been located.
pub fn configure(cfg: &mut web::ServiceConfig) {
    pages::configure_routes(cfg);
    decks::configure_routes(cfg);
    cards::configure_routes(cfg);
}

/// Serve `/static/*` from `dir`.
pub fn static_files(dir: &Path) -> Files {
    Files::new("/static", dir)
}

/// `303 See Other` to `location`.
pub(crate) fn see_other(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

/// Fetch a deck, mapping absence to the deck-not-found error page.
pub(crate) async fn load_deck(state: &AppState, deck_id: &str) -> Result<Deck, AppError> {
    state
        .store
        .get_deck(deck_id)
        .await?
        .ok_or_else(|| AppError::deck_not_found(deck_id))
}
