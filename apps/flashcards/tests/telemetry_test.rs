//! Request logs carry the trace context of the request that produced them.

mod common;

use actix_web::test;
use flashcards::telemetry::CloudLogLayer;
use flashcards::test_support::{create_test_app, create_test_state};
use flashcards_test_support::CapturedLogs;
use serde_json::Value;
use tracing_subscriber::prelude::*;

fn entries(logs: &CapturedLogs) -> Vec<Value> {
    logs.lines()
        .iter()
        .map(|line| serde_json::from_str(line).expect("json log line"))
        .collect()
}

#[actix_web::test]
async fn cloud_log_lines_follow_request_span() {
    let logs = CapturedLogs::new();
    let subscriber = tracing_subscriber::registry().with(CloudLogLayer::new("proj", logs.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = create_test_app(create_test_state().await.unwrap()).await;
    let req = test::TestRequest::get()
        .uri("/error?code=2001")
        .insert_header(("X-Cloud-Trace-Context", "feedface/42;o=1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let entries = entries(&logs);
    let shown = entries
        .iter()
        .find(|e| e["message"] == "showing error page")
        .expect("handler log line");
    assert_eq!(shown["severity"], "INFO");
    assert_eq!(shown["code"], "2001");
    assert_eq!(shown["logging.googleapis.com/trace"], "projects/proj/traces/feedface");
    assert_eq!(shown["logging.googleapis.com/spanId"], "42");
    assert_eq!(shown["httpRequest"]["requestMethod"], "GET");
    assert_eq!(shown["httpRequest"]["requestUrl"], "/error");

    let completed = entries
        .iter()
        .find(|e| e["message"] == "request_completed")
        .expect("completion log line");
    assert_eq!(completed["status"], 200);
    assert!(completed["latency"].as_str().unwrap().ends_with('s'));
    assert_eq!(completed["logging.googleapis.com/trace"], "projects/proj/traces/feedface");
    assert_eq!(completed["logging.googleapis.com/spanId"], "42");
    assert_eq!(completed["httpRequest"]["requestUrl"], "/error");
    assert!(completed.get("trace_id").is_none());
}

#[actix_web::test]
async fn redirects_log_at_info() {
    let logs = CapturedLogs::new();
    let subscriber = tracing_subscriber::registry().with(CloudLogLayer::new("proj", logs.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = create_test_app(create_test_state().await.unwrap()).await;
    let req = test::TestRequest::get().uri("/deck/BAD-CODE").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 303);

    let completed = entries(&logs)
        .into_iter()
        .find(|e| e["message"] == "request_completed")
        .expect("completion log line");
    assert_eq!(completed["severity"], "INFO");
    assert_eq!(completed["status"], 303);
}

#[actix_web::test]
async fn missing_assets_log_a_single_warning() {
    let logs = CapturedLogs::new();
    let subscriber = tracing_subscriber::registry().with(CloudLogLayer::new("proj", logs.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = create_test_app(create_test_state().await.unwrap()).await;
    let req = test::TestRequest::get().uri("/static/nope.css").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let completed: Vec<Value> = entries(&logs)
        .into_iter()
        .filter(|e| e["message"] == "request_completed")
        .collect();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["severity"], "WARNING");
    assert_eq!(completed[0]["status"], 404);
}
