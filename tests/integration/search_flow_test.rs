// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 浏览器表单流程测试
//!
//! 提交表单、重定向、再渲染页面，全程由路由驱动

use super::helpers::{body_text, form_request, page_request, session_cookie, test_app, ScriptedProvider};
use axum::http::{header, StatusCode};
use ddgs_web::domain::models::search_result::ResultRecord;
use ddgs_web::domain::search::provider::ProviderError;
use tower::util::ServiceExt;

fn news(title: &str, date: &str) -> ResultRecord {
    ResultRecord::new()
        .with("date", date)
        .with("title", title)
        .with("body", format!("{title} body"))
        .with("url", format!("https://news.example/{title}"))
        .with("image", "")
        .with("source", "Example")
}

#[tokio::test]
async fn empty_query_shows_validation_message_without_searching() {
    let app = test_app(ScriptedProvider::default());

    let response = app
        .router
        .clone()
        .oneshot(form_request("category=text&query=", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Submit a query"));
    assert!(app.provider.calls().is_empty());
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn whitespace_query_and_missing_category_are_rejected() {
    let app = test_app(ScriptedProvider::default());

    let blank = app
        .router
        .clone()
        .oneshot(form_request("category=news&query=+++", None))
        .await
        .unwrap();
    let no_category = app
        .router
        .clone()
        .oneshot(form_request("query=rust", None))
        .await
        .unwrap();

    assert_eq!(blank.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(no_category.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.provider.calls().is_empty());
}

#[tokio::test]
async fn unknown_category_is_a_hard_failure() {
    let app = test_app(ScriptedProvider::default());

    let response = app
        .router
        .clone()
        .oneshot(form_request("category=web&query=rust", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Unhandled search type"));
    assert!(app.provider.calls().is_empty());
}

#[tokio::test]
async fn provider_failure_surfaces_as_bad_gateway() {
    let app = test_app(ScriptedProvider::failing(ProviderError::RateLimited));

    let response = app
        .router
        .clone()
        .oneshot(form_request("category=videos&query=rust", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(app.provider.calls().len(), 1);
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn valid_submission_stores_results_and_redirects() {
    let app = test_app(ScriptedProvider::returning(vec![ResultRecord::new()
        .with("title", "The Rust Programming Language")
        .with("href", "https://doc.rust-lang.org/book/")
        .with("body", "An introductory book about Rust.")]));

    let response = app
        .router
        .clone()
        .oneshot(form_request("category=text&query=rust+book", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = session_cookie(&response).expect("session cookie is set");
    assert_eq!(
        app.provider.calls(),
        vec![("text".to_string(), "rust book".to_string())]
    );

    let page = app
        .router
        .clone()
        .oneshot(page_request("/", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page).await;
    assert!(html.contains("Text Results for <code>rust book</code>"));
    assert!(html.contains("<h3>The Rust Programming Language</h3>"));
    // 页面渲染只读取会话，不再搜索
    assert_eq!(app.provider.calls().len(), 1);
}

#[tokio::test]
async fn news_is_rendered_newest_first() {
    let app = test_app(ScriptedProvider::returning(vec![
        news("march", "2024-03-01T09:00:00+00:00"),
        news("november", "2024-11-20T18:30:00+00:00"),
        news("january", "2024-01-05T00:00:00+00:00"),
    ]));

    let response = app
        .router
        .clone()
        .oneshot(form_request("category=news&query=rust", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response).unwrap();

    let html = body_text(
        app.router
            .clone()
            .oneshot(page_request("/", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;

    let november = html.find("<h3>november</h3>").unwrap();
    let march = html.find("<h3>march</h3>").unwrap();
    let january = html.find("<h3>january</h3>").unwrap();
    assert!(november < march && march < january);
}

#[tokio::test]
async fn invalid_resubmission_keeps_previous_session() {
    let app = test_app(ScriptedProvider::returning(vec![
        ResultRecord::new().with("phrase", "rust lang")
    ]));

    let first = app
        .router
        .clone()
        .oneshot(form_request("category=suggestions&query=rust", None))
        .await
        .unwrap();
    let cookie = session_cookie(&first).unwrap();

    let rejected = app
        .router
        .clone()
        .oneshot(form_request("category=suggestions&query=", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(
        app.router
            .clone()
            .oneshot(page_request("/", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("Suggestions Results for <code>rust</code>"));
    assert!(html.contains("<dt>phrase</dt><dd>rust lang</dd>"));
    assert_eq!(app.provider.calls().len(), 1);
}

#[tokio::test]
async fn operators_toggle_survives_redirect() {
    let app = test_app(ScriptedProvider::default());

    let response = app
        .router
        .clone()
        .oneshot(form_request("category=answers&query=rust&operators=on", None))
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?operators=on"
    );

    let html = body_text(
        app.router
            .clone()
            .oneshot(page_request("/?operators=on", None))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("<code>cats filetype:pdf</code>"));
}

#[tokio::test]
async fn maps_submission_succeeds_without_provider_call() {
    let app = test_app(ScriptedProvider::default());

    let response = app
        .router
        .clone()
        .oneshot(form_request("category=maps&query=berlin", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response).unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(app.provider.calls().is_empty());

    let html = body_text(
        app.router
            .clone()
            .oneshot(page_request("/", Some(&cookie)))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("Maps Results for <code>berlin</code>"));
    assert!(html.contains("No results."));
}

#[tokio::test]
async fn fresh_visitor_gets_empty_page_and_cookie() {
    let app = test_app(ScriptedProvider::default());

    let response = app
        .router
        .clone()
        .oneshot(page_request("/", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_some());
    let html = body_text(response).await;
    assert!(html.contains("<form class=\"search\""));
    assert!(!html.contains("results-heading"));
}
