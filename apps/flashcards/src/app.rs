//! The application as served: middleware stack, routes and static assets.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};

use crate::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use crate::routes;
use crate::state::app_state::AppState;

/// Build the `App` shared by the server and the route tests.
///
/// `RequestTrace` is the outermost wrapper so the trace context exists
/// before `TraceSpan` opens the request span, and `StructuredLogger` logs
/// inside that span.
pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let static_dir = state.templates.static_dir();

    App::new()
        .wrap(StructuredLogger)
        .wrap(TraceSpan)
        .wrap(RequestTrace)
        .app_data(state)
        .configure(routes::configure)
        .service(routes::static_files(&static_dir))
}
