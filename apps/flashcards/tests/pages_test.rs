mod common;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use flashcards::test_support::{create_test_app, create_test_state};

use common::{select_attr, select_text, success_body};

#[actix_web::test]
async fn index_page_has_heading() {
    let app = create_test_app(create_test_state().await.unwrap()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let body = success_body(resp).await;

    assert_eq!(select_text(&body, "h1"), ["Flashcards"]);
    assert!(!body.contains("Recent decks"));
}

#[actix_web::test]
async fn index_page_lists_history() {
    let app = create_test_app(create_test_state().await.unwrap()).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Cookie", "deckHistory=AAAA-BBBB|TEST-CODE"))
        .to_request();
    let body = success_body(test::call_service(&app, req).await).await;

    assert!(body.contains("Recent decks"));
    assert_eq!(
        select_attr(&body, ".history a", "href"),
        ["/deck/AAAA-BBBB", "/deck/TEST-CODE"]
    );
}

#[actix_web::test]
async fn error_page_shows_known_message() {
    let app = create_test_app(create_test_state().await.unwrap()).await;

    let req = test::TestRequest::get().uri("/error?code=2002").to_request();
    let body = success_body(test::call_service(&app, req).await).await;

    assert_eq!(select_text(&body, ".error"), ["Card not found"]);
}

#[actix_web::test]
async fn error_page_shows_unknown_code() {
    let app = create_test_app(create_test_state().await.unwrap()).await;

    let req = test::TestRequest::get().uri("/error?code=9999").to_request();
    let body = success_body(test::call_service(&app, req).await).await;

    assert_eq!(select_text(&body, ".error"), ["Unknown error 9999"]);
}

#[actix_web::test]
async fn static_assets_are_served() {
    let app = create_test_app(create_test_state().await.unwrap()).await;

    let req = test::TestRequest::get().uri("/static/style.css").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let content_type = resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/css"));
}

#[actix_web::test]
async fn responses_carry_request_id() {
    let app = create_test_app(create_test_state().await.unwrap()).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("X-Cloud-Trace-Context", "0123abcd/5;o=1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("x-request-id").unwrap(), "0123abcd");
}
