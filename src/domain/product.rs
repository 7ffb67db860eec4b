//! Product domain entity and related types.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::config::{MAX_SUSTAINABILITY_SCORE, MIN_NAME_LENGTH};
use crate::errors::{AppError, AppResult};

/// Product domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: Uuid,
    /// Foreign key to the owning perfumer; every product has exactly one owner.
    pub perfumer_id: Uuid,
    pub name: String,
    pub description: String,
    pub fragrance_type: String,
    pub price: f64,
    pub stock: i32,
    pub key_ingredients: String,
    pub sustainability_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product image, owned by its product and cascade-deleted with it.
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A product together with its image set.
#[derive(Debug, Clone)]
pub struct ProductWithImages {
    pub product: Product,
    pub images: Vec<ProductImage>,
}

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub fragrance_type: String,
    pub price: f64,
    pub stock: i32,
    pub key_ingredients: String,
    pub sustainability_score: Option<f64>,
}

impl ProductInput {
    /// Field checks for multipart submissions, which bypass the JSON
    /// validator layer.
    pub fn validate(&self) -> AppResult<()> {
        if (self.name.trim().len() as u64) < MIN_NAME_LENGTH {
            return Err(AppError::validation("name is required"));
        }
        // NaN compares false against everything, so a plain `< 0.0`
        // check would let it through
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(AppError::validation("price must be a non-negative number"));
        }
        if self.stock < 0 {
            return Err(AppError::validation("stock must not be negative"));
        }
        if let Some(score) = self.sustainability_score {
            if !(0.0..=MAX_SUSTAINABILITY_SCORE).contains(&score) {
                return Err(AppError::validation(format!(
                    "sustainability_score must be between 0 and {}",
                    MAX_SUSTAINABILITY_SCORE
                )));
            }
        }
        Ok(())
    }
}

/// Optional-field catalog search filter.
///
/// Absent fields contribute no constraint; the all-absent filter is
/// the identity query. Note the price quirk: a lone bound without its
/// counterpart applies no price constraint at all.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ProductFilter {
    pub fragrance_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub ingredient: Option<String>,
    pub min_sustainability: Option<f64>,
}

/// Product response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub perfumer_id: Uuid,
    pub name: String,
    pub description: String,
    pub fragrance_type: String,
    pub price: f64,
    pub stock: i32,
    pub key_ingredients: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sustainability_score: Option<f64>,
    /// Images inlined as `data:{mime};base64,{payload}` URIs
    pub image_data: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductWithImages> for ProductResponse {
    fn from(item: ProductWithImages) -> Self {
        let image_data = item
            .images
            .into_iter()
            .map(|img| {
                format!(
                    "data:{};base64,{}",
                    img.content_type,
                    base64::engine::general_purpose::STANDARD.encode(&img.data)
                )
            })
            .collect();

        let p = item.product;
        Self {
            id: p.id,
            perfumer_id: p.perfumer_id,
            name: p.name,
            description: p.description,
            fragrance_type: p.fragrance_type,
            price: p.price,
            stock: p.stock,
            key_ingredients: p.key_ingredients,
            sustainability_score: p.sustainability_score,
            image_data,
            created_at: p.created_at,
        }
    }
}
