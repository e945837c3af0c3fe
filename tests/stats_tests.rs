//! Aggregation engine tests: counts derived from raw rows, ordering,
//! join semantics, and tolerance for dangling references.

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use mailtrace::analytics::stats;
use mailtrace::api::services::tracking::tracking_routes;

use common::setup;

#[actix_rt::test]
async fn counts_and_last_opened_are_derived_from_rows() {
    let env = setup().await;
    let message = env
        .store
        .create_message("kate@example.com", Some("Quarterly"), None, None)
        .await
        .unwrap();
    let link = env
        .store
        .create_link(&message.id, "https://report.example/q3")
        .await
        .unwrap();

    for _ in 0..3 {
        env.store
            .insert_open(&message.id, Some("198.51.100.7".into()), Some("UA".into()))
            .await
            .unwrap();
    }
    for _ in 0..2 {
        env.store.insert_click(&link.id, None, None).await.unwrap();
    }

    let stats = stats::message_stats(&env.store, &message.id).await.unwrap();
    assert_eq!(stats.open_count, 3);
    assert_eq!(stats.click_count, 2);
    assert_eq!(stats.opens.len(), 3);
    assert_eq!(stats.clicks.len(), 2);

    // last_opened_at is the most recent open; opens are newest-first.
    assert_eq!(stats.last_opened_at, Some(stats.opens[0].occurred_at));
    assert!(stats.opens[0].occurred_at >= stats.opens[2].occurred_at);
    assert!(stats.clicks[0].id > stats.clicks[1].id || stats.clicks[0].occurred_at > stats.clicks[1].occurred_at);

    // Clicks carry the originating link's destination.
    for click in &stats.clicks {
        assert_eq!(click.original_url.as_deref(), Some("https://report.example/q3"));
    }
}

#[actix_rt::test]
async fn stats_for_unknown_message_are_empty_not_an_error() {
    let env = setup().await;

    let stats = stats::message_stats(&env.store, "never-created").await.unwrap();
    assert_eq!(stats.open_count, 0);
    assert_eq!(stats.click_count, 0);
    assert!(stats.last_opened_at.is_none());
    assert!(stats.opens.is_empty());
    assert!(stats.clicks.is_empty());
}

#[actix_rt::test]
async fn clicks_only_join_through_their_message() {
    let env = setup().await;
    let mine = env
        .store
        .create_message("leo@example.com", None, None, None)
        .await
        .unwrap();
    let theirs = env
        .store
        .create_message("mia@example.com", None, None, None)
        .await
        .unwrap();

    let my_link = env.store.create_link(&mine.id, "https://m.example").await.unwrap();
    let their_link = env
        .store
        .create_link(&theirs.id, "https://t.example")
        .await
        .unwrap();

    env.store.insert_click(&my_link.id, None, None).await.unwrap();
    env.store.insert_click(&their_link.id, None, None).await.unwrap();
    env.store.insert_click(&their_link.id, None, None).await.unwrap();

    let my_stats = stats::message_stats(&env.store, &mine.id).await.unwrap();
    assert_eq!(my_stats.click_count, 1);

    let their_stats = stats::message_stats(&env.store, &theirs.id).await.unwrap();
    assert_eq!(their_stats.click_count, 2);
}

#[actix_rt::test]
async fn dangling_click_events_do_not_poison_aggregation() {
    let env = setup().await;
    let message = env
        .store
        .create_message("nina@example.com", None, None, None)
        .await
        .unwrap();
    let link = env.store.create_link(&message.id, "https://n.example").await.unwrap();

    env.store.insert_click(&link.id, None, None).await.unwrap();
    // Click against a link that was never created.
    env.store
        .insert_click("orphan-link-id", None, None)
        .await
        .unwrap();

    let stats = stats::message_stats(&env.store, &message.id).await.unwrap();
    assert_eq!(stats.click_count, 1);
}

#[actix_rt::test]
async fn stats_endpoint_reports_the_same_numbers() {
    let env = setup().await;
    let message = env
        .store
        .create_message("oscar@example.com", Some("Digest"), None, None)
        .await
        .unwrap();
    env.store.insert_open(&message.id, None, None).await.unwrap();
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
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["open_count"], 2);
    assert_eq!(body["click_count"], 0);
    assert_eq!(body["opens"].as_array().unwrap().len(), 2);
    assert!(body["last_opened_at"].is_string());
}
