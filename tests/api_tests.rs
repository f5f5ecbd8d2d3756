use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use mtgprice::web::create_router;
use serde_json::Value;
use tower::ServiceExt;

mod common;

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// ── /api/price ───────────────────────────────────────────────────────

#[tokio::test]
async fn price_returns_cents() {
    let app = create_router(common::stub_service(true, true), None);
    let (status, json) = get(app, "/api/price?cardName=Lightning%20Bolt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["Low"], 25);
    assert_eq!(json["Mid"], 110);
    assert_eq!(json["High"], 400);
}

#[tokio::test]
async fn price_for_unknown_card_is_404() {
    let app = create_router(common::stub_service(true, true), None);
    let (status, _) = get(app, "/api/price?cardName=Black%20Lotus").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn price_unavailable_is_404() {
    let app = create_router(common::stub_service(false, true), None);
    let (status, _) = get(app, "/api/price?cardName=Sol%20Ring").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn price_without_card_name_is_404() {
    let app = create_router(common::stub_service(true, true), None);
    let (status, _) = get(app, "/api/price").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── /api/info ────────────────────────────────────────────────────────

#[tokio::test]
async fn info_combines_card_and_enrichment() {
    let app = create_router(common::stub_service(true, true), None);
    let (status, json) = get(app, "/api/info?cardName=%C3%86ther%20Vial").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Aether Vial");
    assert_eq!(json["manaCost"], "{1}");
    assert_eq!(json["price"]["Mid"], 110);
    assert_eq!(json["rating"]["CommunityVotes"], 12);
}

#[tokio::test]
async fn info_with_price_source_down_is_partial() {
    let app = create_router(common::stub_service(false, true), None);
    let (status, json) = get(app, "/api/info?cardName=sol%20ring").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Sol Ring");
    assert!(json.get("price").is_none());
    assert_eq!(json["rating"]["CommunityRating"], 4.5);
}

#[tokio::test]
async fn info_for_unknown_card_is_404() {
    let app = create_router(common::stub_service(true, true), None);
    let (status, _) = get(app, "/api/info?cardName=Black%20Lotus").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── /api/search ──────────────────────────────────────────────────────

#[tokio::test]
async fn search_returns_matching_cards() {
    let app = create_router(common::stub_service(true, true), None);
    let (status, json) = get(app, "/api/search?q=c%3Am").await;

    assert_eq!(status, StatusCode::OK);
    let cards = json.as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["name"], "Azorius Charm");
}

#[tokio::test]
async fn search_respects_limit() {
    let app = create_router(common::stub_service(true, true), None);
    let (status, json) = get(app, "/api/search?q=&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
}
