use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    HttpMessage,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

/// Header set by the cloud load balancer: `TRACE_ID/SPAN_ID;o=OPTIONS`.
pub const CLOUD_TRACE_HEADER: &str = "x-cloud-trace-context";

/// Trace identifiers for the current request, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
}

impl TraceContext {
    /// Parse a cloud trace header. Missing span ids become `"0"`.
    pub fn from_cloud_header(value: &str) -> Option<Self> {
        let (trace_id, rest) = match value.split_once('/') {
            Some((trace_id, rest)) => (trace_id, rest),
            None => (value, ""),
        };
        let trace_id = trace_id.trim();
        if trace_id.is_empty() {
            return None;
        }

        let span_id = rest.split(';').next().unwrap_or("").trim();
        Some(Self {
            trace_id: trace_id.to_string(),
            span_id: if span_id.is_empty() { "0" } else { span_id }.to_string(),
        })
    }

    pub fn generate() -> Self {
        Self {
            trace_id: Uuid::new_v4().simple().to_string(),
            span_id: "0".to_string(),
        }
    }
}

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let context = req
            .headers()
            .get(CLOUD_TRACE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(TraceContext::from_cloud_header)
            .unwrap_or_else(TraceContext::generate);
        let trace_id = context.trace_id.clone();

        req.extensions_mut().insert(context);

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            res.headers_mut().insert(
                header::HeaderName::from_static("x-request-id"),
                header::HeaderValue::from_str(&trace_id)
                    .unwrap_or_else(|_| header::HeaderValue::from_static("invalid-trace-id")),
            );

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App, HttpRequest, HttpResponse};

    use super::*;

    #[::core::prelude::v1::test]
    fn parses_cloud_trace_header() {
        let ctx = TraceContext::from_cloud_header("105445aa7843bc8bf206b12000100000/1;o=1").unwrap();
        assert_eq!(ctx.trace_id, "105445aa7843bc8bf206b12000100000");
        assert_eq!(ctx.span_id, "1");

        let ctx = TraceContext::from_cloud_header("abc").unwrap();
        assert_eq!(ctx.trace_id, "abc");
        assert_eq!(ctx.span_id, "0");

        assert_eq!(TraceContext::from_cloud_header(" /1"), None);
    }

    #[actix_web::test]
    async fn echoes_trace_id_as_request_id() {
        let app = test::init_service(App::new().wrap(RequestTrace).route(
            "/",
            web::get().to(|req: HttpRequest| async move {
                let ctx = req.extensions().get::<TraceContext>().cloned();
                HttpResponse::Ok().body(ctx.map(|c| c.span_id).unwrap_or_default())
            }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((CLOUD_TRACE_HEADER, "feedface/42;o=1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "feedface");
        assert_eq!(test::read_body(resp).await, "42");

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        let id = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
        assert_eq!(id.len(), 32);
    }
}
