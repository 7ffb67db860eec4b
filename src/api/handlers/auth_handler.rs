//! Buyer authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::Role;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Buyer registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Buyer email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "buyer@example.com")]
    pub email: String,
    /// Buyer password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Buyer display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ada Moreno")]
    pub name: String,
}

/// Login request, shared by the buyer and perfumer endpoints
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Account email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "buyer@example.com")]
    pub email: String,
    /// Account password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create buyer authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new buyer
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Buyer registered successfully", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let token = state
        .auth_service
        .register_buyer(payload.email, payload.password, payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(token)))
}

/// Login as a buyer and get a JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account is not a buyer account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(Role::Buyer, payload.email, payload.password)
        .await?;

    Ok(Json(token))
}
