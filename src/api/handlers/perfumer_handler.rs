//! Perfumer authentication handlers.
//!
//! Perfumer registration arrives as multipart form data because it
//! carries a certification document alongside the profile fields.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};

use crate::api::extractors::{FormFields, ValidatedJson};
use crate::api::handlers::auth_handler::LoginRequest;
use crate::api::AppState;
use crate::domain::{PerfumerProfile, Role};
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Create perfumer authentication routes
pub fn perfumer_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new perfumer with a certification document
#[utoipa::path(
    post,
    path = "/perfumer/auth/register",
    tag = "Authentication",
    request_body(content = PerfumerProfile, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Perfumer registered successfully", body = TokenResponse),
        (status = 400, description = "Validation error or missing certification"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let mut fields = FormFields::parse(multipart).await?;

    let certification = fields.file("certification")?;
    let profile = PerfumerProfile {
        email: fields.text("email")?,
        password: fields.text("password")?,
        name: fields.text("name")?,
        fragrance_type: fields.text("fragrance_type")?,
        experience: fields.parsed("experience")?,
        mobile: fields.text_opt("mobile"),
        location: fields.text_opt("location"),
        key_ingredients: fields.text_opt("key_ingredients"),
    };

    let token = state
        .auth_service
        .register_perfumer(profile, certification)
        .await?;

    Ok((StatusCode::CREATED, Json(token)))
}

/// Login as a perfumer and get a JWT token
#[utoipa::path(
    post,
    path = "/perfumer/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account is not a perfumer account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(Role::Perfumer, payload.email, payload.password)
        .await?;

    Ok(Json(token))
}
