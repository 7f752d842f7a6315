// Contract tests for the quotation API
//
// Verify status codes, the camelCase response shape and error envelopes of
// /api/quotations without a database.

use actix_web::{http::StatusCode, test, App};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use wazir_backoffice::startup;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::*;

#[actix_web::test]
async fn test_create_quotation_contract() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations")
        .insert_header(ctx.bearer())
        .set_json(TestDataFactory::quotation_payload("Ali Raza"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    for field in [
        "id",
        "quotationNumber",
        "date",
        "customerName",
        "customerPhone",
        "customerAddress",
        "items",
        "subtotal",
        "discountType",
        "discount",
        "discountAmount",
        "total",
        "notes",
        "status",
        "createdAt",
        "updatedAt",
    ] {
        assert!(body.get(field).is_some(), "missing field {}", field);
    }

    assert_eq!(body["status"], "pending");
    assert_eq!(body["discountType"], "percentage");
    assert_eq!(body["date"], "2024-05-01");
    assert_eq!(money(&body["subtotal"]), dec!(1250));
    assert_eq!(money(&body["discountAmount"]), dec!(125));
    assert_eq!(money(&body["total"]), dec!(1125));

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["unit"], "sft");
    assert_eq!(money(&items[0]["amount"]), dec!(1000));
    assert_eq!(money(&items[1]["amount"]), dec!(250));
}

#[actix_web::test]
async fn test_create_quotation_without_number_gets_suggestion() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let mut payload = TestDataFactory::quotation_payload("Sana Malik");
    payload.as_object_mut().unwrap().remove("quotationNumber");
    payload.as_object_mut().unwrap().remove("date");

    let req = test::TestRequest::post()
        .uri("/api/quotations")
        .insert_header(ctx.bearer())
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["quotationNumber"].as_str().unwrap().starts_with("QTN-"));
    assert!(body["date"].is_string());
}

#[actix_web::test]
async fn test_create_quotation_validation_errors() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let cases = vec![
        json!({ "customerPhone": "0300", "items": TestDataFactory::reference_items() }),
        json!({ "customerName": "Ali", "customerPhone": "0300", "items": [] }),
        json!({
            "customerName": "Ali",
            "customerPhone": "0300",
            "items": [{ "description": "Glass", "quantity": -1, "unit": "sft", "rate": 100 }]
        }),
        json!({
            "customerName": "Ali",
            "customerPhone": "0300",
            "items": TestDataFactory::reference_items(),
            "discount": { "type": "percentage", "value": 150 }
        }),
        json!({
            "customerName": "Ali",
            "customerPhone": "0300",
            "items": TestDataFactory::reference_items(),
            "discount": { "type": "amount", "value": 5000 }
        }),
        json!({
            "customerName": "Ali",
            "customerPhone": "0300",
            "items": [{
                "description": "Glass",
                "quantity": "10000000000",
                "unit": "sft",
                "rate": "10000000000"
            }]
        }),
        json!({
            "customerName": "Ali",
            "customerPhone": "0300",
            "items": [{ "description": "Glass", "quantity": "1.00001", "unit": "sft", "rate": 100 }]
        }),
        json!({
            "customerName": "Ali",
            "customerPhone": "0300",
            "items": TestDataFactory::reference_items(),
            "discount": { "type": "percentage", "value": "12.34567" }
        }),
    ];

    for payload in cases {
        let req = test::TestRequest::post()
            .uri("/api/quotations")
            .insert_header(ctx.bearer())
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {}", payload);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], 400);
        assert!(body["error"]["message"].is_string());
    }

    assert!(ctx.quotations.all().is_empty());
}

#[actix_web::test]
async fn test_duplicate_quotation_number_rejected() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let payload = TestDataFactory::quotation_payload("Ali Raza");
    for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
        let req = test::TestRequest::post()
            .uri("/api/quotations")
            .insert_header(ctx.bearer())
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn test_unknown_quotation_returns_404() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    for req in [
        test::TestRequest::get().uri("/api/quotations/missing"),
        test::TestRequest::delete().uri("/api/quotations/missing"),
        test::TestRequest::get().uri("/api/quotations/missing/bill-draft"),
    ] {
        let resp = test::call_service(&app, req.insert_header(ctx.bearer()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], 404);
    }
}

#[actix_web::test]
async fn test_update_recomputes_totals() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations")
        .insert_header(ctx.bearer())
        .set_json(TestDataFactory::quotation_payload("Ali Raza"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/quotations/{}", id))
        .insert_header(ctx.bearer())
        .set_json(json!({
            "discount": { "type": "amount", "value": 250 },
            "status": "accepted"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["discountType"], "amount");
    assert_eq!(money(&body["discount"]), dec!(20));
    assert_eq!(money(&body["discountAmount"]), dec!(250));
    assert_eq!(money(&body["total"]), dec!(1000));
    assert_eq!(body["customerName"], "Ali Raza");
}

#[actix_web::test]
async fn test_delete_quotation_returns_no_content() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations")
        .insert_header(ctx.bearer())
        .set_json(TestDataFactory::quotation_payload("Ali Raza"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/quotations/{}", created["id"].as_str().unwrap());

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_quotations_require_bearer_token() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let req = test::TestRequest::get().uri("/api/quotations").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 401);
}
