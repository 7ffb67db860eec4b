//! Authentication service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use fragrance_market::domain::{FileUpload, Identity, Password, PerfumerProfile, Role};
use fragrance_market::errors::{AppError, AppResult};
use fragrance_market::infra::{
    BuyerRepository, MockBlobStore, MockBuyerRepository, MockPerfumerRepository,
    MockProductRepository, PerfumerRepository, ProductRepository, TransactionContext, UnitOfWork,
};
use fragrance_market::services::{AuthService, Authenticator, IdentityResolver, TokenService};

const TEST_SECRET: &[u8] = b"test-secret-key-minimum-32-chars!!";

fn test_identity(id: Uuid, email: &str, password: &str, role: Role) -> Identity {
    Identity {
        id,
        email: email.to_string(),
        password_hash: Password::new(password).unwrap().into_string(),
        display_name: "Test Account".to_string(),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_profile(email: &str) -> PerfumerProfile {
    PerfumerProfile {
        email: email.to_string(),
        password: "secret-password".to_string(),
        name: "Nora Vela".to_string(),
        fragrance_type: "floral".to_string(),
        experience: 5,
        mobile: None,
        location: Some("Grasse".to_string()),
        key_ingredients: Some("jasmine, bergamot".to_string()),
    }
}

fn test_certification() -> FileUpload {
    FileUpload {
        content_type: "application/pdf".to_string(),
        bytes: b"certificate".to_vec(),
    }
}

/// Test mock for UnitOfWork that wraps mock repositories
struct TestUnitOfWork {
    buyer_repo: Arc<MockBuyerRepository>,
    perfumer_repo: Arc<MockPerfumerRepository>,
    product_repo: Arc<MockProductRepository>,
}

impl TestUnitOfWork {
    fn new(buyer_repo: MockBuyerRepository, perfumer_repo: MockPerfumerRepository) -> Self {
        Self {
            buyer_repo: Arc::new(buyer_repo),
            perfumer_repo: Arc::new(perfumer_repo),
            product_repo: Arc::new(MockProductRepository::new()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn buyers(&self) -> Arc<dyn BuyerRepository> {
        self.buyer_repo.clone()
    }

    fn perfumers(&self) -> Arc<dyn PerfumerRepository> {
        self.perfumer_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn build_service(
    buyer_repo: MockBuyerRepository,
    perfumer_repo: MockPerfumerRepository,
    blobs: MockBlobStore,
) -> Authenticator<TestUnitOfWork> {
    let uow = Arc::new(TestUnitOfWork::new(buyer_repo, perfumer_repo));
    let tokens = Arc::new(TokenService::new(TEST_SECRET, 24));
    Authenticator::new(uow, Arc::new(blobs), tokens)
}

#[tokio::test]
async fn test_register_buyer_success_issues_buyer_token() {
    let mut buyers = MockBuyerRepository::new();
    buyers
        .expect_find_by_email()
        .with(eq("new@example.com"))
        .returning(|_| Ok(None));
    buyers.expect_create().returning(|email, hash, name| {
        Ok(Identity {
            id: Uuid::new_v4(),
            email,
            password_hash: hash,
            display_name: name,
            role: Role::Buyer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    });

    let service = build_service(buyers, MockPerfumerRepository::new(), MockBlobStore::new());
    let token = service
        .register_buyer(
            "new@example.com".to_string(),
            "secret-password".to_string(),
            "Ada Moreno".to_string(),
        )
        .await
        .unwrap();

    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.email, "new@example.com");
    assert_eq!(claims.role, Role::Buyer);
}

#[tokio::test]
async fn test_register_buyer_duplicate_email() {
    let mut buyers = MockBuyerRepository::new();
    buyers
        .expect_find_by_email()
        .returning(|email| Ok(Some(test_identity(Uuid::new_v4(), email, "pw-unused1", Role::Buyer))));
    buyers.expect_create().times(0);

    let service = build_service(buyers, MockPerfumerRepository::new(), MockBlobStore::new());
    let result = service
        .register_buyer(
            "taken@example.com".to_string(),
            "secret-password".to_string(),
            "Ada Moreno".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_register_perfumer_stores_certification_before_identity() {
    let mut perfumers = MockPerfumerRepository::new();
    perfumers.expect_find_by_email().returning(|_| Ok(None));
    perfumers.expect_create().returning(|new| {
        assert_eq!(new.certification_path, "uploads/cert.pdf");
        Ok(Identity {
            id: Uuid::new_v4(),
            email: new.email,
            password_hash: new.password_hash,
            display_name: new.name,
            role: Role::Perfumer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    });

    let mut blobs = MockBlobStore::new();
    blobs
        .expect_store()
        .times(1)
        .returning(|_, _| Ok("uploads/cert.pdf".to_string()));

    let service = build_service(MockBuyerRepository::new(), perfumers, blobs);
    let token = service
        .register_perfumer(test_profile("nora@example.com"), test_certification())
        .await
        .unwrap();

    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.role, Role::Perfumer);
}

#[tokio::test]
async fn test_register_perfumer_storage_failure_creates_no_identity() {
    let mut perfumers = MockPerfumerRepository::new();
    perfumers.expect_find_by_email().returning(|_| Ok(None));
    // A storage failure must abort before any identity row is written
    perfumers.expect_create().times(0);

    let mut blobs = MockBlobStore::new();
    blobs
        .expect_store()
        .returning(|_, _| Err(AppError::storage("disk full")));

    let service = build_service(MockBuyerRepository::new(), perfumers, blobs);
    let result = service
        .register_perfumer(test_profile("nora@example.com"), test_certification())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Storage(_)));
}

#[tokio::test]
async fn test_login_unknown_email_is_invalid_credentials() {
    let mut buyers = MockBuyerRepository::new();
    buyers.expect_find_by_email().returning(|_| Ok(None));
    let mut perfumers = MockPerfumerRepository::new();
    perfumers.expect_find_by_email().returning(|_| Ok(None));

    let service = build_service(buyers, perfumers, MockBlobStore::new());
    let result = service
        .login(
            Role::Buyer,
            "ghost@example.com".to_string(),
            "whatever-pw".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_wrong_password_is_invalid_credentials() {
    let mut buyers = MockBuyerRepository::new();
    buyers
        .expect_find_by_email()
        .returning(|email| Ok(Some(test_identity(Uuid::new_v4(), email, "right-password", Role::Buyer))));
    let mut perfumers = MockPerfumerRepository::new();
    perfumers.expect_find_by_email().returning(|_| Ok(None));

    let service = build_service(buyers, perfumers, MockBlobStore::new());
    let result = service
        .login(
            Role::Buyer,
            "buyer@example.com".to_string(),
            "wrong-password".to_string(),
        )
        .await;

    // Indistinguishable from the unknown-email case
    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_wrong_role_endpoint_is_role_mismatch() {
    let buyers = MockBuyerRepository::new();
    let mut perfumers = MockPerfumerRepository::new();
    perfumers
        .expect_find_by_email()
        .returning(|email| Ok(Some(test_identity(Uuid::new_v4(), email, "secret-password", Role::Perfumer))));

    let service = build_service(buyers, perfumers, MockBlobStore::new());
    let result = service
        .login(
            Role::Buyer,
            "nora@example.com".to_string(),
            "secret-password".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::RoleMismatch));
}

#[tokio::test]
async fn test_resolver_prefers_perfumer_store_on_shared_email() {
    let id_perfumer = Uuid::new_v4();
    let mut buyers = MockBuyerRepository::new();
    buyers
        .expect_find_by_email()
        .returning(|email| Ok(Some(test_identity(Uuid::new_v4(), email, "pw-unused2", Role::Buyer))));
    let mut perfumers = MockPerfumerRepository::new();
    perfumers.expect_find_by_email().returning(move |email| {
        Ok(Some(test_identity(id_perfumer, email, "pw-unused3", Role::Perfumer)))
    });

    let uow = Arc::new(TestUnitOfWork::new(buyers, perfumers));
    let resolver = IdentityResolver::new(uow);
    let identity = resolver.resolve("shared@example.com").await.unwrap();

    assert_eq!(identity.id, id_perfumer);
    assert_eq!(identity.role, Role::Perfumer);
}

#[tokio::test]
async fn test_resolver_unknown_email_is_not_found() {
    let mut buyers = MockBuyerRepository::new();
    buyers.expect_find_by_email().returning(|_| Ok(None));
    let mut perfumers = MockPerfumerRepository::new();
    perfumers.expect_find_by_email().returning(|_| Ok(None));

    let uow = Arc::new(TestUnitOfWork::new(buyers, perfumers));
    let resolver = IdentityResolver::new(uow);
    let result = resolver.resolve("ghost@example.com").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
