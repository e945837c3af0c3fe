//! Tracking API tests: message/link creation, validation, wrapped-link
//! round-trips, and the owner listing.

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use mailtrace::api::services::redirect::redirect_routes;
use mailtrace::api::services::tracking::tracking_routes;

use common::setup;

macro_rules! api_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.store.clone()))
                .app_data(web::Data::new($env.recorder.clone()))
                .service(tracking_routes())
                .service(redirect_routes()),
        )
        .await
    };
}

#[actix_rt::test]
async fn create_message_requires_owner_id() {
    let env = setup().await;
    let app = api_app!(env);

    let req = TestRequest::post()
        .uri("/tracking/messages")
        .set_json(json!({ "subject": "no owner" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("owner_id"));
}

#[actix_rt::test]
async fn create_message_defaults_subject_and_recipient() {
    let env = setup().await;
    let app = api_app!(env);

    let req = TestRequest::post()
        .uri("/tracking/messages")
        .set_json(json!({ "owner_id": "erin@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let message_id = body["message_id"].as_str().unwrap();
    assert!(body["pixel_url"]
        .as_str()
        .unwrap()
        .ends_with(&format!("/pixel/{}.png", message_id)));

    let stored = env.store.get_message(message_id).await.unwrap().unwrap();
    assert_eq!(stored.subject, "Untitled");
    assert_eq!(stored.recipient, "Unknown");
    assert_eq!(stored.owner_id, "erin@example.com");
}

#[actix_rt::test]
async fn client_minted_id_is_honored() {
    let env = setup().await;
    let app = api_app!(env);

    let req = TestRequest::post()
        .uri("/tracking/messages")
        .set_json(json!({
            "owner_id": "frank@example.com",
            "message_id": "11111111-2222-3333-4444-555555555555"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message_id"].as_str().unwrap(),
        "11111111-2222-3333-4444-555555555555"
    );
}

#[actix_rt::test]
async fn wrapped_links_round_trip_to_their_originals() {
    let env = setup().await;
    let app = api_app!(env);

    let req = TestRequest::post()
        .uri("/tracking/messages")
        .set_json(json!({
            "owner_id": "grace@example.com",
            "subject": "Two links",
            "links": ["https://a.example", "https://b.example"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let wrapped = body["wrapped_links"].as_object().unwrap();
    assert_eq!(wrapped.len(), 2);
    assert_eq!(body["failed_links"].as_array().unwrap().len(), 0);

    for original in ["https://a.example", "https://b.example"] {
        let wrapped_url = wrapped[original].as_str().unwrap();
        // Follow only the path+query portion against the test server.
        let path = wrapped_url
            .splitn(4, '/')
            .nth(3)
            .map(|rest| format!("/{}", rest))
            .unwrap();

        let resp =
            test::call_service(&app, TestRequest::get().uri(&path).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get("Location").unwrap().to_str().unwrap();
        assert_eq!(location, original);
    }
}

#[actix_rt::test]
async fn invalid_link_is_partial_failure_not_fatal() {
    let env = setup().await;
    let app = api_app!(env);

    let req = TestRequest::post()
        .uri("/tracking/messages")
        .set_json(json!({
            "owner_id": "heidi@example.com",
            "links": ["https://ok.example", "javascript:alert(1)"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let wrapped = body["wrapped_links"].as_object().unwrap();
    assert_eq!(wrapped.len(), 1);
    assert!(wrapped.contains_key("https://ok.example"));
    assert_eq!(
        body["failed_links"].as_array().unwrap(),
        &vec![Value::from("javascript:alert(1)")]
    );

    // The message itself persisted despite the bad link.
    let message_id = body["message_id"].as_str().unwrap();
    assert!(env.store.get_message(message_id).await.unwrap().is_some());
}

#[actix_rt::test]
async fn post_link_wraps_one_url() {
    let env = setup().await;
    let message = env
        .store
        .create_message("ivan@example.com", None, None, None)
        .await
        .unwrap();

    let app = api_app!(env);

    let req = TestRequest::post()
        .uri("/tracking/links")
        .set_json(json!({
            "message_id": message.id,
            "original_url": "https://docs.example/guide"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let link_id = body["link_id"].as_str().unwrap();
    assert!(body["tracking_url"]
        .as_str()
        .unwrap()
        .contains(&format!("/redirect/{}", link_id)));

    let stored = env.store.get_link(link_id).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://docs.example/guide");
    assert_eq!(stored.message_id, message.id);

    // And it shows up under its message.
    let links = env.store.list_links_for_message(&message.id).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].id, link_id);
}

#[actix_rt::test]
async fn post_link_rejects_missing_fields_and_bad_urls() {
    let env = setup().await;
    let app = api_app!(env);

    for body in [
        json!({ "original_url": "https://x.example" }),
        json!({ "message_id": "m1" }),
        json!({ "message_id": "m1", "original_url": "ftp://x.example" }),
    ] {
        let req = TestRequest::post()
            .uri("/tracking/links")
            .set_json(body.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    }
}

#[actix_rt::test]
async fn owner_listing_is_newest_first_with_aggregates() {
    let env = setup().await;

    let first = env
        .store
        .create_message("judy@example.com", Some("First"), None, None)
        .await
        .unwrap();
    // Keep the two created_at values distinct for the ordering assert.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = env
        .store
        .create_message("judy@example.com", Some("Second"), None, None)
        .await
        .unwrap();
    // Someone else's message must not leak into the listing.
    env.store
        .create_message("mallory@example.com", Some("Other"), None, None)
        .await
        .unwrap();

    env.store
        .insert_open(&first.id, Some("203.0.113.9".into()), None)
        .await
        .unwrap();
    env.store
        .insert_open(&first.id, Some("203.0.113.9".into()), None)
        .await
        .unwrap();
    let link = env.store.create_link(&second.id, "https://z.example").await.unwrap();
    env.store.insert_click(&link.id, None, None).await.unwrap();

    let app = api_app!(env);
    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/tracking/messages/judy@example.com")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);

    // created_at desc, ties broken by id desc; `second` was created last.
    assert_eq!(messages[0]["subject"], "Second");
    assert_eq!(messages[0]["open_count"], 0);
    assert_eq!(messages[0]["click_count"], 1);
    assert_eq!(messages[1]["subject"], "First");
    assert_eq!(messages[1]["open_count"], 2);
    assert_eq!(messages[1]["click_count"], 0);
    assert!(messages[1]["last_opened_at"].is_string());
    assert!(messages[0]["last_opened_at"].is_null());
}
