//! Cross-store identity resolution.
//!
//! One email, two independent principal stores. Resolution probes the
//! perfumer store first and falls back to the buyer store; the first
//! match wins. This ordering is deliberate policy: email uniqueness is
//! enforced per store, so the same address can exist in both, and in
//! that case the perfumer identity always takes precedence.

use std::sync::Arc;

use crate::domain::Identity;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Resolves an email to exactly one normalized identity.
pub struct IdentityResolver<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> IdentityResolver<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Probe both stores in priority order; `None` when neither matches.
    ///
    /// No side effects; used directly by login so the caller can keep
    /// verification timing flat for unknown emails.
    pub async fn lookup(&self, email: &str) -> AppResult<Option<Identity>> {
        if let Some(perfumer) = self.uow.perfumers().find_by_email(email).await? {
            return Ok(Some(perfumer));
        }

        self.uow.buyers().find_by_email(email).await
    }

    /// Resolve an email or fail with `NotFound`.
    pub async fn resolve(&self, email: &str) -> AppResult<Identity> {
        self.lookup(email).await?.ok_or(AppError::NotFound)
    }
}
