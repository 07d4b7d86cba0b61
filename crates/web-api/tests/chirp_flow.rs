mod support;

use application::Environment;
use axum::http::{header, StatusCode};
use serde_json::json;
use uuid::Uuid;

use support::{create_account, empty_request, json_request, send_raw, send_request, test_app};

#[tokio::test]
async fn healthz_is_plain_text() {
    let app = test_app(Environment::Production);

    let (status, headers, body) = send_raw(&app.router, empty_request("GET", "/api/healthz")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn account_to_chirp_flow() {
    let app = test_app(Environment::Production);

    let account = create_account(&app.router, "walt@breakingbad.com", "04234").await;
    assert_eq!(account["email"], "walt@breakingbad.com");
    assert!(account.get("password").is_none());
    assert!(account.get("hashed_password").is_none());
    let user_id = account["id"].as_str().unwrap().parse::<Uuid>().unwrap();

    let (status, login) = send_request(
        &app.router,
        json_request(
            "POST",
            "/api/login",
            json!({ "email": "walt@breakingbad.com", "password": "04234" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["id"], account["id"]);

    let (status, chirp) = send_request(
        &app.router,
        json_request(
            "POST",
            "/api/chirps",
            json!({ "body": "This is a kerfuffle opinion", "user_id": user_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(chirp["body"], "This is a **** opinion");
    assert_eq!(chirp["user_id"], account["id"]);
    let chirp_id = chirp["id"].as_str().unwrap().to_owned();

    let (status, fetched) = send_request(
        &app.router,
        empty_request("GET", &format!("/api/chirps/{chirp_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, chirp);

    let (status, listed) = send_request(&app.router, empty_request("GET", "/api/chirps")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0], chirp);
}

#[tokio::test]
async fn chirps_are_listed_in_creation_order() {
    let app = test_app(Environment::Production);
    let account = create_account(&app.router, "a@b.com", "pw").await;

    for body in ["first", "second", "third"] {
        let (status, _) = send_request(
            &app.router,
            json_request(
                "POST",
                "/api/chirps",
                json!({ "body": body, "user_id": account["id"] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, listed) = send_request(&app.router, empty_request("GET", "/api/chirps")).await;
    let bodies: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, ["first", "second", "third"]);
}

#[tokio::test]
async fn chirp_length_boundary() {
    let app = test_app(Environment::Production);
    let account = create_account(&app.router, "a@b.com", "pw").await;

    let (status, _) = send_request(
        &app.router,
        json_request(
            "POST",
            "/api/chirps",
            json!({ "body": "a".repeat(140), "user_id": account["id"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_request(
        &app.router,
        json_request(
            "POST",
            "/api/chirps",
            json!({ "body": "a".repeat(141), "user_id": account["id"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CHIRP_TOO_LONG");
}

#[tokio::test]
async fn chirp_for_unknown_account_is_a_server_error() {
    let app = test_app(Environment::Production);

    let (status, body) = send_request(
        &app.router,
        json_request(
            "POST",
            "/api/chirps",
            json!({ "body": "hello", "user_id": Uuid::new_v4() }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn unknown_or_malformed_chirp_id_is_not_found() {
    let app = test_app(Environment::Production);

    let (status, _) = send_request(
        &app.router,
        empty_request("GET", &format!("/api/chirps/{}", Uuid::new_v4())),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        send_request(&app.router, empty_request("GET", "/api/chirps/not-a-uuid")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app(Environment::Production);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/chirps")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();
    let (status, body) = send_request(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
}
