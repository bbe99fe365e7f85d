//! API integration tests
//!
//! Each test spawns its own server on the in-memory store. The postgres test
//! additionally needs DATABASE_URL and skips without it.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_json, assert_status, fixtures::*, postgres_test_config, test_config, TestServer,
};
use reqwest::{header, StatusCode};

const REGISTERED: &str = "User successfully registered";
const RESET_REQUESTED: &str = "If the email is registered, a password reset link has been sent.";

async fn register(server: &TestServer, creds: &Credentials) {
    let response = server.post("/api/v1/auth/register", creds).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

async fn login(server: &TestServer, creds: &Credentials) -> Token {
    let response = server.post("/api/v1/auth/login", creds).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["store"], "healthy");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_then_duplicate() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();

    let response = server.post("/api/v1/auth/register", &creds).await.unwrap();
    let body: Message = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(body.message, REGISTERED);

    let response = server.post("/api/v1/auth/register", &creds).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials {
        email: "not-an-email".to_string(),
        password: "pw1".to_string(),
    };

    let response = server.post("/api/v1/auth/register", &creds).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_concurrent_registration_has_one_winner() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();

    let responses = join_all(
        (0..8).map(|_| server.post("/api/v1/auth/register", &creds)),
    )
    .await;

    let statuses: Vec<StatusCode> = responses
        .into_iter()
        .map(|r| r.unwrap().status())
        .collect();
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        1
    );
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(),
        7
    );
}

// ============================================================================
// Login and identity
// ============================================================================

#[tokio::test]
async fn test_login_and_who_am_i() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();
    register(&server, &creds).await;

    let token = login(&server, &creds).await;
    assert_eq!(token.token_type, "bearer");
    assert_eq!(token.expires_in, 1800);

    let response = server
        .get_auth("/api/v1/users/me", &token.access_token)
        .await
        .unwrap();
    let me: Me = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, creds.email);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();
    register(&server, &creds).await;

    let wrong_password = server
        .post("/api/v1/auth/login", &creds.with_password("wrong"))
        .await
        .unwrap();
    assert_eq!(
        wrong_password.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    let wrong_password: ErrorEnvelope = assert_json(wrong_password, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    let unknown = server
        .post("/api/v1/auth/login", &Credentials::unique())
        .await
        .unwrap();
    let unknown: ErrorEnvelope = assert_json(unknown, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    assert_eq!(wrong_password, unknown);
    assert_eq!(unknown.error.code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_token_form_grant() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();
    register(&server, &creds).await;

    let response = server
        .post_form(
            "/api/v1/auth/token",
            &[
                ("grant_type", "password"),
                ("username", creds.email.as_str()),
                ("password", creds.password.as_str()),
            ],
        )
        .await
        .unwrap();
    let token: Token = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/api/v1/users/me", &token.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_form(
            "/api/v1/auth/token",
            &[("username", "not-an-email"), ("password", "whatever")],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let long_password = "p".repeat(129);
    let response = server
        .post_form(
            "/api/v1/auth/token",
            &[("username", creds.email.as_str()), ("password", long_password.as_str())],
        )
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_who_am_i_rejects_bad_tokens() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/users/me").await.unwrap();
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    let body: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");

    let response = server
        .get_auth("/api/v1/users/me", "not.a.token")
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(body.error.code, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    let issuer = TestServer::start().await.expect("Failed to start server");
    let verifier = TestServer::start_with_config(
        test_config(&[("JWT_SECRET", "another-integration-secret-of-32-bytes-plus")]).unwrap(),
    )
    .await
    .expect("Failed to start server");

    let creds = Credentials::unique();
    register(&issuer, &creds).await;
    register(&verifier, &creds).await;
    let token = login(&issuer, &creds).await;

    let response = verifier
        .get_auth("/api/v1/users/me", &token.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let server = TestServer::start_with_config(
        test_config(&[("JWT_ACCESS_TOKEN_EXPIRY", "1")]).unwrap(),
    )
    .await
    .expect("Failed to start server");
    let creds = Credentials::unique();
    register(&server, &creds).await;
    let token = login(&server, &creds).await;
    assert_eq!(token.expires_in, 1);

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    let response = server
        .get_auth("/api/v1/users/me", &token.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Password reset and change
// ============================================================================

#[tokio::test]
async fn test_forgot_password_does_not_leak_registration() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();
    register(&server, &creds).await;

    let known = server
        .post(
            "/api/v1/auth/forgot-password",
            &ForgotPassword {
                email: creds.email.clone(),
            },
        )
        .await
        .unwrap();
    let known: Message = assert_json(known, StatusCode::OK).await.unwrap();

    let unknown = server
        .post(
            "/api/v1/auth/forgot-password",
            &ForgotPassword {
                email: unique_email(),
            },
        )
        .await
        .unwrap();
    let unknown: Message = assert_json(unknown, StatusCode::OK).await.unwrap();

    assert_eq!(known, unknown);
    assert_eq!(known.message, RESET_REQUESTED);
}

#[tokio::test]
async fn test_change_password() {
    let server = TestServer::start().await.expect("Failed to start server");
    let creds = Credentials::unique();
    register(&server, &creds).await;
    let token = login(&server, &creds).await;

    let response = server
        .post_auth(
            "/api/v1/auth/change-password",
            &token.access_token,
            &ChangePassword {
                current_password: "wrong".to_string(),
                new_password: "NewPass456!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/auth/change-password",
            &token.access_token,
            &ChangePassword {
                current_password: creds.password.clone(),
                new_password: "NewPass456!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.post("/api/v1/auth/login", &creds).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    login(&server, &creds.with_password("NewPass456!")).await;
}

#[tokio::test]
async fn test_change_password_requires_bearer() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post(
            "/api/v1/auth/change-password",
            &ChangePassword {
                current_password: "a".to_string(),
                new_password: "b".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Durable store
// ============================================================================

#[tokio::test]
async fn test_postgres_backend_scenario() {
    let Some(config) = postgres_test_config().unwrap() else {
        return;
    };

    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");
    let creds = Credentials::unique();
    register(&server, &creds).await;

    let response = server.post("/api/v1/auth/register", &creds).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let token = login(&server, &creds).await;
    let response = server
        .get_auth("/api/v1/users/me", &token.access_token)
        .await
        .unwrap();
    let me: Me = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, creds.email);

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
