//! Integration tests for chirp creation, listing and ownership.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, bearer};

#[tokio::test]
async fn test_only_author_can_delete() {
    let app = TestApp::new();
    app.register("walt@breakingbad.com", "04234").await;
    app.register("jesse@breakingbad.com", "yo").await;
    let walt = app.login("walt@breakingbad.com", "04234").await;
    let jesse = app.login("jesse@breakingbad.com", "yo").await;

    let created = app
        .request(
            "POST",
            "/api/chirps",
            Some(json!({ "body": "Say my name" })),
            Some(&bearer(&walt.token)),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let uri = format!("/api/chirps/{}", created.body["id"].as_str().expect("id"));

    let response = app.request("DELETE", &uri, None, Some(&bearer(&jesse.token))).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");

    let response = app.request("GET", &uri, None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("DELETE", &uri, None, Some(&bearer(&walt.token))).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &uri, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("DELETE", &uri, None, Some(&bearer(&walt.token))).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_authentication() {
    let app = TestApp::new();
    app.register("walt@breakingbad.com", "04234").await;
    let walt = app.login("walt@breakingbad.com", "04234").await;

    let created = app
        .request(
            "POST",
            "/api/chirps",
            Some(json!({ "body": "Tread lightly" })),
            Some(&bearer(&walt.token)),
        )
        .await;
    let uri = format!("/api/chirps/{}", created.body["id"].as_str().expect("id"));

    let response = app.request("DELETE", &uri, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_body_is_validated_and_masked() {
    let app = TestApp::new();
    app.register("walt@breakingbad.com", "04234").await;
    let walt = app.login("walt@breakingbad.com", "04234").await;
    let auth = bearer(&walt.token);

    let response = app
        .request(
            "POST",
            "/api/chirps",
            Some(json!({ "body": "x".repeat(141) })),
            Some(&auth),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/chirps",
            Some(json!({ "body": "What a Kerfuffle this sharbert is!" })),
            Some(&auth),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["body"], "What a **** this **** is!");
}

#[tokio::test]
async fn test_list_filters_and_sorts() {
    let app = TestApp::new();
    app.register("walt@breakingbad.com", "04234").await;
    app.register("jesse@breakingbad.com", "yo").await;
    let walt = app.login("walt@breakingbad.com", "04234").await;
    let jesse = app.login("jesse@breakingbad.com", "yo").await;

    for (session, body) in [(&walt, "first"), (&jesse, "second"), (&walt, "third")] {
        let response = app
            .request(
                "POST",
                "/api/chirps",
                Some(json!({ "body": body })),
                Some(&bearer(&session.token)),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let all = app.request("GET", "/api/chirps", None, None).await;
    assert_eq!(all.status, StatusCode::OK);
    let bodies: Vec<&str> = all
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["body"].as_str().expect("body"))
        .collect();
    assert_eq!(bodies, ["first", "second", "third"]);

    let uri = format!("/api/chirps?author_id={}&sort=desc", walt.user_id);
    let walts = app.request("GET", &uri, None, None).await;
    let bodies: Vec<&str> = walts
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["body"].as_str().expect("body"))
        .collect();
    assert_eq!(bodies, ["third", "first"]);

    let bad = app.request("GET", "/api/chirps?sort=sideways", None, None).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let bad = app.request("GET", "/api/chirps?author_id=nope", None, None).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_with_invalid_id_is_bad_request() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/chirps/not-a-uuid", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_created_at_follows_app_clock() {
    let app = TestApp::new();
    app.register("walt@breakingbad.com", "04234").await;
    let walt = app.login("walt@breakingbad.com", "04234").await;
    let auth = bearer(&walt.token);

    let later = app
        .request("POST", "/api/chirps", Some(json!({ "body": "later" })), Some(&auth))
        .await;
    assert_eq!(later.status, StatusCode::CREATED);

    // Step the clock back; the token was issued "now" so it stays valid.
    app.advance(chrono::Duration::minutes(-10));
    let earlier = app
        .request("POST", "/api/chirps", Some(json!({ "body": "earlier" })), Some(&auth))
        .await;
    assert_eq!(earlier.status, StatusCode::CREATED);

    let listed = app.request("GET", "/api/chirps", None, None).await;
    let bodies: Vec<&str> = listed
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["body"].as_str().expect("body"))
        .collect();
    assert_eq!(bodies, ["earlier", "later"]);

    let later_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(later.body["created_at"].clone()).expect("timestamp");
    let earlier_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(earlier.body["created_at"].clone()).expect("timestamp");
    assert_eq!(later_at - earlier_at, chrono::Duration::minutes(10));
}
