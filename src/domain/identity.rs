//! Identity domain types.
//!
//! Buyers and perfumers live in two independent principal stores,
//! but authentication works over one normalized `Identity` record
//! tagged with its role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_BUYER, ROLE_PERFUMER};

/// Principal roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Perfumer,
}

impl Role {
    /// Check whether this role may own catalog items
    pub fn is_perfumer(&self) -> bool {
        matches!(self, Role::Perfumer)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            ROLE_PERFUMER => Role::Perfumer,
            _ => Role::Buyer,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Buyer => write!(f, "{}", ROLE_BUYER),
            Role::Perfumer => write!(f, "{}", ROLE_PERFUMER),
        }
    }
}

/// A resolved principal record: one normalized shape regardless of
/// which store (buyers or perfumers) it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Token-derived identity claims, trusted after signature verification.
///
/// This is the value handlers and services authorize against; it never
/// touches the principal stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Perfumer registration profile.
///
/// Carries the seller-specific fields collected at signup; the
/// certification document travels separately as an upload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PerfumerProfile {
    pub email: String,
    pub password: String,
    pub name: String,
    pub fragrance_type: String,
    pub experience: i32,
    pub mobile: Option<String>,
    pub location: Option<String>,
    pub key_ingredients: Option<String>,
}
