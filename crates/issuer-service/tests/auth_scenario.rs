//! End-to-end walk through the authentication use cases against the
//! in-memory account store.

use std::sync::Arc;

use issuer_common::{AppError, JwtService, PasswordService};
use issuer_db::InMemoryAccountRepository;
use issuer_service::dto::{LoginRequest, PasswordResetRequest, RegisterRequest};
use issuer_service::services::{REGISTERED_MESSAGE, RESET_REQUESTED_MESSAGE};
use issuer_service::{AuthService, ServiceContext, ServiceError};

fn context_with(repo: Arc<InMemoryAccountRepository>) -> ServiceContext {
    ServiceContext::builder()
        .account_repo(repo)
        .jwt_service(Arc::new(JwtService::new(
            "scenario-secret-key-that-is-long-enough",
            1800,
        )))
        .password_service(Arc::new(PasswordService::with_params(1024, 1, 1).unwrap()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_register_login_whoami_reset() {
    let ctx = context_with(Arc::new(InMemoryAccountRepository::new()));
    let auth = AuthService::new(&ctx);

    let registered = auth
        .register(RegisterRequest {
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(registered.message, REGISTERED_MESSAGE);

    let duplicate = auth
        .register(RegisterRequest {
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        })
        .await;
    assert!(matches!(
        duplicate,
        Err(ServiceError::App(AppError::AlreadyExists(_)))
    ));

    let token = auth
        .login(LoginRequest {
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        })
        .await
        .unwrap();

    let me = auth.who_am_i(&token.access_token).await.unwrap();
    assert_eq!(me.email, "a@x.com");

    let wrong = auth
        .login(LoginRequest {
            email: "a@x.com".to_string(),
            password: "wrong".to_string(),
        })
        .await;
    assert!(matches!(
        wrong,
        Err(ServiceError::App(AppError::InvalidCredentials))
    ));

    let known = auth
        .request_password_reset(PasswordResetRequest {
            email: "a@x.com".to_string(),
        })
        .await
        .unwrap();
    let unknown = auth
        .request_password_reset(PasswordResetRequest {
            email: "nobody@x.com".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(known.message, RESET_REQUESTED_MESSAGE);
    assert_eq!(known, unknown);
}

#[tokio::test]
async fn test_rotating_secret_invalidates_tokens() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let ctx = context_with(repo.clone());
    let auth = AuthService::new(&ctx);
    auth.register(RegisterRequest {
        email: "a@x.com".to_string(),
        password: "pw1".to_string(),
    })
    .await
    .unwrap();
    let token = auth
        .login(LoginRequest {
            email: "a@x.com".to_string(),
            password: "pw1".to_string(),
        })
        .await
        .unwrap();

    // Same store, new signing secret
    let rotated = ServiceContext::builder()
        .account_repo(repo)
        .jwt_service(Arc::new(JwtService::new(
            "a-completely-different-secret-value-here",
            1800,
        )))
        .build()
        .unwrap();

    let result = AuthService::new(&rotated).who_am_i(&token.access_token).await;
    assert!(matches!(
        result,
        Err(ServiceError::App(AppError::Unauthorized))
    ));
}
