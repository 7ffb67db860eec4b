//! Authentication gateway.
//!
//! Orchestrates registration and login for both principal kinds:
//! uniqueness checks against the right store, credential hashing,
//! certification storage ordering for perfumers, role-consistency
//! enforcement at login, and session token issuance.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{FileUpload, Password, PerfumerProfile, Role, DUMMY_PASSWORD_HASH};
use crate::errors::{AppError, AppResult};
use crate::infra::{BlobStore, NewPerfumer, UnitOfWork};
use crate::services::identity_resolver::IdentityResolver;
use crate::services::token_service::{Claims, TokenResponse, TokenService};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new buyer and return a session token
    async fn register_buyer(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> AppResult<TokenResponse>;

    /// Register a new perfumer with their certification document.
    ///
    /// The document is persisted before any identity row is created;
    /// a storage failure aborts the whole registration.
    async fn register_perfumer(
        &self,
        profile: PerfumerProfile,
        certification: FileUpload,
    ) -> AppResult<TokenResponse>;

    /// Login against the endpoint of the given kind.
    ///
    /// Unknown email and wrong password are both `InvalidCredentials`;
    /// correct credentials on the wrong endpoint are `RoleMismatch`.
    async fn login(&self, kind: Role, email: String, password: String)
        -> AppResult<TokenResponse>;

    /// Verify a session token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    resolver: IdentityResolver<U>,
    blobs: Arc<dyn BlobStore>,
    tokens: Arc<TokenService>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance
    pub fn new(uow: Arc<U>, blobs: Arc<dyn BlobStore>, tokens: Arc<TokenService>) -> Self {
        let resolver = IdentityResolver::new(uow.clone());
        Self {
            uow,
            resolver,
            blobs,
            tokens,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register_buyer(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> AppResult<TokenResponse> {
        // Uniqueness is per store: only the buyer table is consulted here
        if self.uow.buyers().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Account"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let identity = self.uow.buyers().create(email, password_hash, name).await?;

        tracing::info!(buyer_id = %identity.id, "buyer registered");
        self.tokens.issue(identity.id, &identity.email, Role::Buyer)
    }

    async fn register_perfumer(
        &self,
        profile: PerfumerProfile,
        certification: FileUpload,
    ) -> AppResult<TokenResponse> {
        if self
            .uow
            .perfumers()
            .find_by_email(&profile.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Account"));
        }

        let password_hash = Password::new(&profile.password)?.into_string();

        // Certification must land before the identity row exists, so a
        // storage failure can never leave an orphaned perfumer behind.
        let certification_path = self
            .blobs
            .store(certification.bytes, &certification.content_type)
            .await?;

        let identity = self
            .uow
            .perfumers()
            .create(NewPerfumer {
                email: profile.email,
                password_hash,
                name: profile.name,
                fragrance_type: profile.fragrance_type,
                experience: profile.experience,
                mobile: profile.mobile,
                location: profile.location,
                key_ingredients: profile.key_ingredients,
                certification_path,
            })
            .await?;

        tracing::info!(perfumer_id = %identity.id, "perfumer registered");
        self.tokens
            .issue(identity.id, &identity.email, Role::Perfumer)
    }

    async fn login(
        &self,
        kind: Role,
        email: String,
        password: String,
    ) -> AppResult<TokenResponse> {
        // SECURITY: verify against a dummy hash when the email resolves
        // to nothing, so unknown-email and wrong-password are
        // indistinguishable in both outcome and timing.
        let identity = match self.resolver.lookup(&email).await? {
            Some(found) if Password::from_hash(found.password_hash.clone()).verify(&password) => {
                found
            }
            Some(_) => return Err(AppError::InvalidCredentials),
            None => {
                let _ = Password::from_hash(DUMMY_PASSWORD_HASH.to_string()).verify(&password);
                return Err(AppError::InvalidCredentials);
            }
        };

        // Correct credentials on the wrong endpoint are still refused
        if identity.role != kind {
            tracing::warn!(
                email = %identity.email,
                role = %identity.role,
                "login attempt on wrong-role endpoint"
            );
            return Err(AppError::RoleMismatch);
        }

        self.tokens
            .issue(identity.id, &identity.email, identity.role)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.verify(token)
    }
}
