use actix_web::{web, HttpRequest, HttpResponse};
use minijinja::context;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AppError;
use crate::errors::error_text;
use crate::state::app_state::AppState;
use crate::web::History;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorQuery {
    pub code: String,
}

async fn home(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let history = History::from_request(&req);
    debug!(entries = history.entries().len(), "showing home page");

    app_state.templates.page(
        "index",
        context! {
            message => "Flashcards",
            history => history.entries(),
        },
    )
}

async fn error_page(
    query: web::Query<ErrorQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let message = error_text(&query.code);
    info!(code = %query.code, text = %message, "showing error page");

    app_state
        .templates
        .page("error", context! { error => message })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/error", web::get().to(error_page));
}
