//! Helpers for building a fully wired application in tests.
//!
//! Each call produces an independent in-memory store seeded with the demo
//! deck, so tests never observe each other's writes.

use std::path::PathBuf;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::web;

use crate::app::build_app;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::build_state;

/// Templates shipped with the crate.
pub fn template_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// State backed by a fresh, seeded `MemoryStore`.
pub async fn create_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_template_dir(template_dir())
        .with_demo_data(true)
        .build()
        .await
}

/// Initialize the production app around `state` as an Actix test service.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    actix_web::test::init_service(build_app(web::Data::new(state))).await
}
