use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use thiserror::Error;

use crate::errors::ErrorCode;
use crate::store::StoreError;

/// Error type returned by every handler.
///
/// Not-found and authorisation failures are not hard errors for the user:
/// they become a `303 See Other` to the error page carrying the numeric code.
/// Everything else is logged and answered with a plain 500.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Deck not found: {deck_id}")]
    DeckNotFound { deck_id: String },
    #[error("Card not found: {card_id} in deck {deck_id}")]
    CardNotFound { deck_id: String, card_id: String },
    #[error("Not authorised to create decks")]
    NotAuthorised,
    #[error("Template error: {detail}")]
    Template { detail: String },
    #[error("Store error: {detail}")]
    Store { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn deck_not_found(deck_id: impl Into<String>) -> Self {
        Self::DeckNotFound {
            deck_id: deck_id.into(),
        }
    }

    pub fn card_not_found(deck_id: impl Into<String>, card_id: impl Into<String>) -> Self {
        Self::CardNotFound {
            deck_id: deck_id.into(),
            card_id: card_id.into(),
        }
    }

    pub fn template(detail: String) -> Self {
        Self::Template { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    /// Error page code for errors that are shown to the user via redirect.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            AppError::DeckNotFound { .. } => Some(ErrorCode::DeckNotFound),
            AppError::CardNotFound { .. } => Some(ErrorCode::CardNotFound),
            AppError::NotAuthorised => Some(ErrorCode::NotAuthorised),
            AppError::Template { .. }
            | AppError::Store { .. }
            | AppError::Internal { .. }
            | AppError::Config { .. } => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.error_code() {
            Some(_) => StatusCode::SEE_OTHER,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store {
            detail: e.to_string(),
        }
    }
}

impl From<minijinja::Error> for AppError {
    fn from(e: minijinja::Error) -> Self {
        AppError::template(format!("{e:#}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        match self.error_code() {
            Some(code) => {
                tracing::debug!(error = %self, code = %code, "redirecting to error page");
                HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, code.error_page()))
                    .finish()
            }
            None => {
                tracing::error!(error = %self, "request failed");
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Internal Server Error")
            }
        }
    }
}
