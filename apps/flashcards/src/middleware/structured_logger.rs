//! Completion line for every request.
//!
//! Runs inside the `request` span opened by `TraceSpan`, so method, path and
//! trace ids reach the log output through the span. The event itself only
//! adds the outcome: response status and latency in the cloud duration
//! format (`"0.004213s"`).

use std::future::{ready, Ready};
use std::time::{Duration, Instant};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{event, Level};

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            Completion {
                status,
                elapsed: start.elapsed(),
            }
            .log();
            result
        })
    }
}

struct Completion {
    status: StatusCode,
    elapsed: Duration,
}

impl Completion {
    /// Server errors are errors, client errors warnings. Redirects to the
    /// error page are part of normal navigation and stay at info.
    fn level(&self) -> Level {
        if self.status.is_server_error() {
            Level::ERROR
        } else if self.status.is_client_error() {
            Level::WARN
        } else {
            Level::INFO
        }
    }

    fn latency(&self) -> String {
        format!("{:.6}s", self.elapsed.as_secs_f64())
    }

    fn log(&self) {
        let status = u64::from(self.status.as_u16());
        let latency = self.latency();

        // `event!` needs a constant level per callsite.
        macro_rules! completed {
            ($level:expr) => {
                event!($level, status, latency = %latency, "request_completed")
            };
        }

        match self.level() {
            Level::ERROR => completed!(Level::ERROR),
            Level::WARN => completed!(Level::WARN),
            _ => completed!(Level::INFO),
        }
    }
}
