#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{LOCATION, SET_COOKIE};
use actix_web::http::StatusCode;
use actix_web::test;
use scraper::{Html, Selector};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    flashcards_test_support::logging::init();
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Assert a `303 See Other` to exactly `expected`.
pub fn assert_redirect_to<B>(resp: &ServiceResponse<B>, expected: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "expected a redirect");
    assert_eq!(location(resp), expected);
}

/// Assert a `303 See Other` whose target starts with `prefix`; returns the target.
pub fn assert_redirect_to_prefix<B>(resp: &ServiceResponse<B>, prefix: &str) -> String {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "expected a redirect");
    let target = location(resp);
    assert!(
        target.starts_with(prefix),
        "redirect target {target} does not start with {prefix}"
    );
    target
}

/// The `deckHistory` cookie set by the response, if any.
pub fn history_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.headers()
        .get_all(SET_COOKIE)
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| Cookie::parse_encoded(v.to_string()).ok())
        .find(|c| c.name() == "deckHistory")
}

/// Assert success and return the body as text.
pub async fn success_body<B>(resp: ServiceResponse<B>) -> String
where
    B: MessageBody,
{
    assert!(
        resp.status().is_success(),
        "unexpected status {}",
        resp.status()
    );
    let bytes = test::read_body(resp).await;
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Attribute values of every element matching `selector`, entity-decoded.
pub fn select_attr(body: &str, selector: &str, attr: &str) -> Vec<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    Html::parse_document(body)
        .select(&selector)
        .filter_map(|el| el.value().attr(attr).map(str::to_string))
        .collect()
}

/// Text of every element matching `selector`, whitespace-trimmed.
pub fn select_text(body: &str, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    Html::parse_document(body)
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}
