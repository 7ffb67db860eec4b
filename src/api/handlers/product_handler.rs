//! Product catalog handlers.
//!
//! Create and update accept multipart form data so product fields and
//! image files travel in one request, matching the storefront client.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::FormFields;
use crate::api::AppState;
use crate::domain::{Principal, ProductFilter, ProductInput, ProductResponse};
use crate::errors::AppResult;

/// Public catalog routes (no authentication)
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/marketplace", get(marketplace))
        .route("/:id", get(get_product))
}

/// Perfumer catalog routes (require JWT)
pub fn protected_product_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_product))
        .route("/update/:id", put(update_product))
        .route("/delete/:id", delete(delete_product))
        .route("/my-products", get(my_products))
}

fn product_input(fields: &FormFields) -> AppResult<ProductInput> {
    Ok(ProductInput {
        name: fields.text("name")?,
        description: fields.text("description")?,
        fragrance_type: fields.text("fragrance_type")?,
        price: fields.parsed("price")?,
        stock: fields.parsed("stock")?,
        key_ingredients: fields.text("key_ingredients")?,
        sustainability_score: fields.parsed_opt("sustainability_score")?,
    })
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products/add",
    tag = "Products",
    request_body(content = ProductInput, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a perfumer")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_product(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let mut fields = FormFields::parse(multipart).await?;
    let input = product_input(&fields)?;
    let images = fields.files("images");

    let product = state
        .product_service
        .add_product(&principal, input, images)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update an owned product, replacing its images when new ones are sent
#[utoipa::path(
    put,
    path = "/products/update/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body(content = ProductInput, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 403, description = "Caller does not own this product"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ProductResponse>> {
    let mut fields = FormFields::parse(multipart).await?;
    let input = product_input(&fields)?;
    let images = fields.files("images");

    let product = state
        .product_service
        .update_product(&principal, id, input, images)
        .await?;

    Ok(Json(product))
}

/// Delete an owned product
#[utoipa::path(
    delete,
    path = "/products/delete/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Caller does not own this product"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.product_service.delete_product(&principal, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the authenticated perfumer's products
#[utoipa::path(
    get,
    path = "/products/my-products",
    tag = "Products",
    responses(
        (status = 200, description = "Products owned by the caller", body = [ProductResponse]),
        (status = 403, description = "Caller is not a perfumer")
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_products(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.product_service.my_products(&principal).await?;

    Ok(Json(products))
}

/// Browse the marketplace with optional filters
#[utoipa::path(
    get,
    path = "/products/marketplace",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Matching products", body = [ProductResponse])
    )
)]
pub async fn marketplace(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.product_service.search(filter).await?;

    Ok(Json(products))
}

/// Fetch a single product with its images
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.product_service.get_product(id).await?;

    Ok(Json(product))
}
