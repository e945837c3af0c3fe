//! Read-path budget tests: an exhausted aggregation budget surfaces as
//! a 500 with the flat error body.
//!
//! Configuration is frozen per process, so this suite lives in its own
//! binary where the zero-second budget can be set before first use.

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use mailtrace::api::services::tracking::tracking_routes;

use common::setup;

#[actix_rt::test]
async fn exhausted_stats_budget_maps_to_500_with_error_body() {
    unsafe {
        std::env::set_var("STATS_TIMEOUT_SECS", "0");
    }

    let env = setup().await;
    let message = env
        .store
        .create_message("peggy@example.com", Some("Slow dashboard"), None, None)
        .await
        .unwrap();
    env.store.insert_open(&message.id, None, None).await.unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(env.store.clone()))
            .app_data(web::Data::new(env.recorder.clone()))
            .service(tracking_routes()),
    )
    .await;

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/tracking/messages/{}/stats", message.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert!(
        body["error"].as_str().unwrap().contains("time budget"),
        "body: {}",
        body
    );

    // The owner listing runs under the same budget.
    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/tracking/messages/peggy@example.com")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}
