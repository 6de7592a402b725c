use actix_web::{web, HttpRequest, HttpResponse};
use minijinja::context;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{load_deck, see_other};
use crate::domain::{random_deck_id, Deck, DomainError};
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::web::share::{deck_url, qr_png};
use crate::web::History;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeckQuery {
    pub deck: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShareQuery {
    pub share: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewDeckForm {
    pub title: String,
    pub author: String,
}

async fn deck_redirect(query: web::Query<DeckQuery>) -> HttpResponse {
    let location = format!("/deck/{}", query.deck.trim().to_uppercase());
    debug!(location = %location, "redirecting to deck");
    see_other(location)
}

async fn deck_page(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<ShareQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck_id = path.into_inner();
    debug!(deck_id = %deck_id, "showing deck");

    let deck = load_deck(&app_state, &deck_id).await?;

    let share = (query.share == "true").then(|| {
        let host = req.connection_info().host().to_string();
        deck_url(&host, &deck_id)
    });

    let mut history = History::from_request(&req);
    history.push(&deck_id);

    let mut resp = app_state.templates.page(
        "deck",
        context! {
            deck => &deck,
            cards => deck.sorted_cards(),
            share => share,
        },
    )?;
    resp.add_cookie(&history.to_cookie())
        .map_err(|e| AppError::internal(format!("invalid history cookie: {e}")))?;
    Ok(resp)
}

async fn random_card(
    query: web::Query<DeckQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck_id = query.deck.trim().to_uppercase();

    let Some(deck) = app_state.store.get_deck(&deck_id).await? else {
        warn!(deck_id = %deck_id, "could not fetch deck");
        return Ok(see_other("/"));
    };

    match deck.random_card() {
        Ok(card) => {
            info!(deck = %deck.title, card_id = %card.id, "showing random card");
            Ok(see_other(format!(
                "/deck/{}/card/{}?answer=hide",
                deck_id, card.id
            )))
        }
        Err(DomainError::EmptyDeck(_)) => {
            info!(deck_id = %deck_id, "deck has no cards");
            Ok(see_other(format!("/deck/{deck_id}")))
        }
    }
}

async fn new_deck(
    form: web::Form<NewDeckForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    if !app_state.store.is_valid_author(&form.author).await? {
        warn!("rejected deck creation with invalid author key");
        return Err(AppError::NotAuthorised);
    }

    let deck = Deck::new(random_deck_id(), form.title);
    info!(deck_id = %deck.id, title = %deck.title, "creating deck");
    app_state.store.put_deck(&deck.id, &deck).await?;

    Ok(see_other(format!("/deck/{}", deck.id)))
}

async fn qr_code(req: HttpRequest, query: web::Query<DeckQuery>) -> Result<HttpResponse, AppError> {
    let deck_id = query.deck.trim().to_uppercase();
    let host = req.connection_info().host().to_string();
    let url = deck_url(&host, &deck_id);
    debug!(url = %url, "generating qr code");

    let png = qr_png(&url)?;
    Ok(HttpResponse::Ok().content_type("image/png").body(png))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/decks", web::get().to(deck_redirect))
        .route("/deck/{id}", web::get().to(deck_page))
        .route("/random", web::get().to(random_card))
        .route("/newdeck", web::post().to(new_deck))
        .route("/qrcode", web::get().to(qr_code));
}
