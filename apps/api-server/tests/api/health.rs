use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use api_server::observability::REQUEST_ID_HEADER;

use crate::common::TestContext;

#[actix_web::test]
async fn health_reports_ok() {
    let ctx = TestContext::seeded().await;
    let app = test_app!(ctx.state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], ctx.state.storage);
}

#[actix_web::test]
async fn request_id_is_echoed() {
    let ctx = TestContext::seeded().await;
    let app = test_app!(ctx.state);

    let req = test::TestRequest::get()
        .uri("/posts")
        .insert_header((REQUEST_ID_HEADER, "trace-me-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "trace-me-123");
}

#[actix_web::test]
async fn request_id_is_generated_on_errors_too() {
    let ctx = TestContext::seeded().await;
    let app = test_app!(ctx.state);

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let id = resp.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}
