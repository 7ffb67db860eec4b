//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, perfumer_handler, product_handler};
use crate::domain::{PerfumerProfile, ProductInput, ProductResponse, Role};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Fragrance Market API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fragrance Market API",
        version = "0.1.0",
        description = "Marketplace backend for perfumers and buyers with JWT authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
        (url = "https://api.example.com", description = "Production server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        perfumer_handler::register,
        perfumer_handler::login,
        // Product endpoints
        product_handler::add_product,
        product_handler::update_product,
        product_handler::delete_product,
        product_handler::my_products,
        product_handler::marketplace,
        product_handler::get_product,
    ),
    components(
        schemas(
            // Domain types
            Role,
            PerfumerProfile,
            ProductInput,
            ProductResponse,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Buyer and perfumer registration and login"),
        (name = "Products", description = "Catalog management and marketplace browsing")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login or /perfumer/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
