//! Integration tests for API endpoints.
//!
//! These tests use mock services behind the real router and middleware,
//! so no Postgres instance is required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use fragrance_market::api::{create_router, AppState};
use fragrance_market::domain::{
    FileUpload, PerfumerProfile, Principal, ProductFilter, ProductInput, ProductResponse, Role,
};
use fragrance_market::errors::{AppError, AppResult};
use fragrance_market::infra::Database;
use fragrance_market::services::{AuthService, Claims, ProductService, TokenResponse};

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock auth service that returns predefined responses
struct StubAuthService {
    principal_id: Uuid,
}

#[async_trait]
impl AuthService for StubAuthService {
    async fn register_buyer(
        &self,
        _email: String,
        _password: String,
        _name: String,
    ) -> AppResult<TokenResponse> {
        Ok(stub_token())
    }

    async fn register_perfumer(
        &self,
        _profile: PerfumerProfile,
        _certification: FileUpload,
    ) -> AppResult<TokenResponse> {
        Ok(stub_token())
    }

    async fn login(
        &self,
        _kind: Role,
        _email: String,
        _password: String,
    ) -> AppResult<TokenResponse> {
        Ok(stub_token())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: self.principal_id,
                email: "nora@example.com".to_string(),
                role: Role::Perfumer,
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::TamperedToken)
        }
    }
}

fn stub_token() -> TokenResponse {
    TokenResponse {
        access_token: "stub-token".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 86400,
    }
}

/// Mock product service that records nothing and returns fixed data
struct StubProductService {
    owner_id: Uuid,
}

fn stub_product(owner_id: Uuid) -> ProductResponse {
    ProductResponse {
        id: Uuid::new_v4(),
        perfumer_id: owner_id,
        name: "Amber Oud".to_string(),
        description: "A warm resinous evening scent".to_string(),
        fragrance_type: "woody".to_string(),
        price: 120.0,
        stock: 10,
        key_ingredients: "amber, oud".to_string(),
        sustainability_score: Some(7.5),
        image_data: vec![],
        created_at: Utc::now(),
    }
}

#[async_trait]
impl ProductService for StubProductService {
    async fn add_product(
        &self,
        actor: &Principal,
        _input: ProductInput,
        _images: Vec<FileUpload>,
    ) -> AppResult<ProductResponse> {
        Ok(stub_product(actor.id))
    }

    async fn update_product(
        &self,
        actor: &Principal,
        _id: Uuid,
        _input: ProductInput,
        _images: Vec<FileUpload>,
    ) -> AppResult<ProductResponse> {
        Ok(stub_product(actor.id))
    }

    async fn delete_product(&self, _actor: &Principal, _id: Uuid) -> AppResult<()> {
        Ok(())
    }

    async fn my_products(&self, actor: &Principal) -> AppResult<Vec<ProductResponse>> {
        Ok(vec![stub_product(actor.id)])
    }

    async fn get_product(&self, _id: Uuid) -> AppResult<ProductResponse> {
        Err(AppError::NotFound)
    }

    async fn search(&self, _filter: ProductFilter) -> AppResult<Vec<ProductResponse>> {
        Ok(vec![stub_product(self.owner_id)])
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

async fn test_app() -> (axum::Router, Uuid) {
    let principal_id = Uuid::new_v4();

    let db = Arc::new(
        Database::connect_without_migrations(&fragrance_market::Config::new(
            "sqlite::memory:",
            "test-secret-key-minimum-32-chars!!",
            24,
            "127.0.0.1",
            0,
            "./uploads",
        ))
        .await
        .unwrap(),
    );

    let state = AppState::new(
        Arc::new(StubAuthService { principal_id }),
        Arc::new(StubProductService {
            owner_id: principal_id,
        }),
        db,
    );

    (create_router(state), principal_id)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_root_endpoint_returns_welcome_message() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Fragrance Market"));
}

#[tokio::test]
async fn test_health_endpoint_reports_database() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("healthy"));
}

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::get("/products/my-products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_bad_token_is_unauthorized() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::get("/products/my-products")
                .header(header::AUTHORIZATION, "Bearer forged-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_valid_token() {
    let (app, principal_id) = test_app().await;

    let response = app
        .oneshot(
            Request::get("/products/my-products")
                .header(header::AUTHORIZATION, "Bearer valid-test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(&principal_id.to_string()));
}

#[tokio::test]
async fn test_marketplace_is_public() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::get("/products/marketplace?fragrance_type=woody")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Amber Oud"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::get(format!("/products/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_with_invalid_email_is_rejected() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"not-an-email","password":"whatever"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("Invalid email format"));
}

#[tokio::test]
async fn test_login_returns_token() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"nora@example.com","password":"secret-password"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("stub-token"));
    assert!(body.contains("Bearer"));
}

// =============================================================================
// Domain Model Tests
// =============================================================================

#[tokio::test]
async fn test_role_display() {
    assert_eq!(Role::Buyer.to_string(), "buyer");
    assert_eq!(Role::Perfumer.to_string(), "perfumer");
}

#[tokio::test]
async fn test_role_from_str() {
    // Role implements From<&str>, not FromStr
    assert_eq!(Role::from("perfumer"), Role::Perfumer);
    assert_eq!(Role::from("buyer"), Role::Buyer);
    // Unknown values default to Buyer
    assert_eq!(Role::from("admin"), Role::Buyer);
}
