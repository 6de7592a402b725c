use actix_web::{web, HttpResponse};
use minijinja::{context, Value};
use serde::Deserialize;
use tracing::{debug, info};

use super::{load_deck, see_other};
use crate::domain::Card;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::web::render_markdown;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnswerQuery {
    pub answer: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CardFormQuery {
    pub deck: String,
    pub card: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CardForm {
    pub deck_id: String,
    pub card_id: String,
    pub question: String,
    pub answer: String,
    pub hint: String,
}

impl CardForm {
    fn apply_to(&self, card: &mut Card) {
        card.question.clone_from(&self.question);
        card.answer.clone_from(&self.answer);
        card.hint.clone_from(&self.hint);
    }
}

fn markdown(source: &str) -> Value {
    Value::from_safe_string(render_markdown(source))
}

/// Answer visibility requested by the query string; defaults to `none`.
fn answer_mode(raw: &str) -> String {
    let mode = raw.trim().to_lowercase();
    if mode.is_empty() {
        "none".to_string()
    } else {
        mode
    }
}

async fn card_page(
    path: web::Path<(String, String)>,
    query: web::Query<AnswerQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (deck_id, card_id) = path.into_inner();
    debug!(deck_id = %deck_id, card_id = %card_id, "showing card");

    let deck = load_deck(&app_state, &deck_id).await?;
    let card = deck
        .card(&card_id)
        .ok_or_else(|| AppError::card_not_found(&deck_id, &card_id))?;

    app_state.templates.page(
        "card",
        context! {
            deck => &deck,
            card => card,
            show => answer_mode(&query.answer),
            question => markdown(&card.question),
            answer => markdown(&card.answer),
            hint => markdown(&card.hint),
        },
    )
}

async fn new_card_form(
    query: web::Query<CardFormQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck_id = query.deck.trim().to_uppercase();
    debug!(deck_id = %deck_id, "showing new card page");

    let deck = load_deck(&app_state, &deck_id).await?;

    app_state.templates.page(
        "editcard",
        context! {
            deck => &deck,
            card => Card::default(),
            form_action => "/newcard",
        },
    )
}

async fn new_card(
    form: web::Form<CardForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let mut deck = load_deck(&app_state, &form.deck_id).await?;

    let mut card = Card::default();
    form.apply_to(&mut card);
    let card_id = deck.add_card(card);
    info!(deck_id = %deck.id, card_id = %card_id, "added card");

    app_state.store.put_deck(&deck.id, &deck).await?;

    Ok(see_other(format!("/deck/{}", form.deck_id)))
}

async fn edit_card_form(
    query: web::Query<CardFormQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck_id = query.deck.trim().to_uppercase();
    let card_id = query.card.trim().to_uppercase();
    debug!(deck_id = %deck_id, card_id = %card_id, "showing edit card page");

    let deck = load_deck(&app_state, &deck_id).await?;
    let card = deck
        .card(&card_id)
        .ok_or_else(|| AppError::card_not_found(&deck_id, &card_id))?;

    app_state.templates.page(
        "editcard",
        context! {
            deck => &deck,
            card => card,
            form_action => "/editcard",
        },
    )
}

async fn edit_card(
    form: web::Form<CardForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    info!(deck_id = %form.deck_id, card_id = %form.card_id, "received card edit");

    let mut deck = load_deck(&app_state, &form.deck_id).await?;
    let mut card = deck
        .card(&form.card_id)
        .cloned()
        .ok_or_else(|| AppError::card_not_found(&form.deck_id, &form.card_id))?;

    form.apply_to(&mut card);
    deck.put_card(&form.card_id, card);
    app_state.store.put_deck(&deck.id, &deck).await?;

    Ok(see_other(format!(
        "/deck/{}/card/{}?answer=show",
        form.deck_id, form.card_id
    )))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/deck/{id}/card/{card}", web::get().to(card_page))
        .route("/newcard", web::get().to(new_card_form))
        .route("/newcard", web::post().to(new_card))
        .route("/editcard", web::get().to(edit_card_form))
        .route("/editcard", web::post().to(edit_card));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_mode_defaults_to_none() {
        assert_eq!(answer_mode(""), "none");
        assert_eq!(answer_mode("SHOW"), "show");
        assert_eq!(answer_mode(" hide "), "hide");
    }

    #[test]
    fn form_fields_replace_card_text() {
        let mut card = Card::new("q", "a", "h");
        card.id = "C1".to_string();
        let form = CardForm {
            question: "NewQ".to_string(),
            answer: "NewA".to_string(),
            hint: String::new(),
            ..CardForm::default()
        };

        form.apply_to(&mut card);

        assert_eq!(card.id, "C1");
        assert_eq!(card.question, "NewQ");
        assert_eq!(card.answer, "NewA");
        assert_eq!(card.hint, "");
    }
}
