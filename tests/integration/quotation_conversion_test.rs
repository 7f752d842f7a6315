// Integration tests for quotation → bill conversion
//
// A bill created with a quotationId flips that quotation to `converted`.
// The flip is best effort; the bill is stored even when it fails.

use actix_web::{http::StatusCode, test, App};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use wazir_backoffice::quotations::QuotationStatus;
use wazir_backoffice::startup;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::*;

#[actix_web::test]
async fn test_bill_from_draft_converts_quotation() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations")
        .insert_header(ctx.bearer())
        .set_json(TestDataFactory::quotation_payload("Ali Raza"))
        .to_request();
    let quotation: Value = test::call_and_read_body_json(&app, req).await;
    let id = quotation["id"].as_str().unwrap();
    let number = quotation["quotationNumber"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/quotations/{}/bill-draft", id))
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let mut draft: Value = test::read_body_json(resp).await;

    assert_eq!(draft["quotationId"], id);
    assert_eq!(draft["customerName"], "Ali Raza");
    assert_eq!(draft["items"].as_array().unwrap().len(), 2);
    assert_eq!(money(&draft["taxRate"]), dec!(0));
    assert_eq!(money(&draft["amountReceived"]), dec!(0));
    assert_eq!(
        draft["notes"],
        format!("Generated from Quotation #{}\n\nInstallation included", number)
    );

    // The admin adds tax and an advance before saving
    draft["taxRate"] = json!(5);
    draft["amountReceived"] = json!(500);

    let req = test::TestRequest::post()
        .uri("/api/bills")
        .insert_header(ctx.bearer())
        .set_json(&draft)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bill: Value = test::read_body_json(resp).await;

    assert_eq!(bill["quotationId"], id);
    assert_eq!(money(&bill["total"]), dec!(1181.25));
    assert_eq!(bill["status"], "advanced");

    let stored = ctx.quotations.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, QuotationStatus::Converted);

    // Only the status moved
    let req = test::TestRequest::get()
        .uri(&format!("/api/quotations/{}", id))
        .insert_header(ctx.bearer())
        .to_request();
    let after: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(after["status"], "converted");
    for field in ["quotationNumber", "customerName", "items", "total", "notes"] {
        assert_eq!(after[field], quotation[field], "field {} changed", field);
    }
}

#[actix_web::test]
async fn test_converted_quotation_is_final() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations")
        .insert_header(ctx.bearer())
        .set_json(TestDataFactory::quotation_payload("Ali Raza"))
        .to_request();
    let quotation: Value = test::call_and_read_body_json(&app, req).await;
    let id = quotation["id"].as_str().unwrap();

    let mut bill = TestDataFactory::bill_payload("Ali Raza");
    bill["quotationId"] = json!(id);
    let req = test::TestRequest::post()
        .uri("/api/bills")
        .insert_header(ctx.bearer())
        .set_json(bill)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::put()
        .uri(&format!("/api/quotations/{}", id))
        .insert_header(ctx.bearer())
        .set_json(json!({ "status": "accepted" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/quotations/{}/bill-draft", id))
        .insert_header(ctx.bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    assert_eq!(ctx.quotations.all()[0].status, QuotationStatus::Converted);
}

#[actix_web::test]
async fn test_admin_cannot_set_converted_directly() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations")
        .insert_header(ctx.bearer())
        .set_json(TestDataFactory::quotation_payload("Ali Raza"))
        .to_request();
    let quotation: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/quotations/{}", quotation["id"].as_str().unwrap()))
        .insert_header(ctx.bearer())
        .set_json(json!({ "status": "converted" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.quotations.all()[0].status, QuotationStatus::Pending);
}

#[actix_web::test]
async fn test_bill_with_unknown_quotation_is_still_created() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let mut bill = TestDataFactory::bill_payload("Ali Raza");
    bill["quotationId"] = json!("no-such-quotation");
    let req = test::TestRequest::post()
        .uri("/api/bills")
        .insert_header(ctx.bearer())
        .set_json(bill)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["quotationId"], "no-such-quotation");
    assert_eq!(ctx.bills.all().len(), 1);
}

#[actix_web::test]
async fn test_failed_conversion_keeps_bill() {
    let ctx = TestContext::new();
    let app =
        test::init_service(App::new().configure(|cfg| startup::configure(cfg, &ctx.state))).await;

    let req = test::TestRequest::post()
        .uri("/api/quotations")
        .insert_header(ctx.bearer())
        .set_json(TestDataFactory::quotation_payload("Ali Raza"))
        .to_request();
    let quotation: Value = test::call_and_read_body_json(&app, req).await;

    ctx.quotations.fail_status_updates();

    let mut bill = TestDataFactory::bill_payload("Ali Raza");
    bill["quotationId"] = quotation["id"].clone();
    let req = test::TestRequest::post()
        .uri("/api/bills")
        .insert_header(ctx.bearer())
        .set_json(bill)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    assert_eq!(ctx.bills.all().len(), 1);
    assert_eq!(ctx.quotations.all()[0].status, QuotationStatus::Pending);
}
