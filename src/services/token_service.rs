//! Session token issuance and verification.
//!
//! HMAC-signed (HS256) JWTs carrying `{sub, email, role, iat, exp}`.
//! The signing key is immutable after construction, so one instance
//! serves unlimited concurrent verifications without locking. Expiry
//! and tampering are reported as distinct error kinds.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Principal, Role};
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Issues and verifies session tokens with a process-wide secret key.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl TokenService {
    /// Create a token service from the signing secret and TTL.
    pub fn new(secret: &[u8], expiration_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration_hours,
        }
    }

    /// Issue a signed token embedding the identity claims.
    pub fn issue(&self, subject_id: Uuid, email: &str, role: Role) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: subject_id,
            email: email.to_string(),
            role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.expiration_hours * SECONDS_PER_HOUR,
        })
    }

    /// Verify a token and return its claims as trusted.
    ///
    /// Fails with `ExpiredToken` once `exp` has passed and with
    /// `TamperedToken` on any signature or claim mismatch.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::default();
        // Expiry is a hard boundary; no clock leeway.
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    const SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

    fn service() -> TokenService {
        TokenService::new(SECRET, 24)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let svc = service();
        let id = Uuid::new_v4();

        let issued = svc.issue(id, "p@example.com", Role::Perfumer).unwrap();
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 24 * 3600);

        let claims = svc.verify(&issued.access_token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "p@example.com");
        assert_eq!(claims.role, Role::Perfumer);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL puts exp strictly in the past
        let svc = TokenService::new(SECRET, -1);
        let issued = svc.issue(Uuid::new_v4(), "b@example.com", Role::Buyer).unwrap();

        let result = service().verify(&issued.access_token);
        assert!(matches!(result.unwrap_err(), AppError::ExpiredToken));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let svc = service();
        let issued = svc.issue(Uuid::new_v4(), "b@example.com", Role::Buyer).unwrap();

        let mut token = issued.access_token;
        // Flip the last signature character
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        let result = svc.verify(&token);
        assert!(matches!(result.unwrap_err(), AppError::TamperedToken));
    }

    #[test]
    fn test_mutated_claims_rejected() {
        let svc = service();
        let a = svc.issue(Uuid::new_v4(), "a@example.com", Role::Buyer).unwrap();
        let b = svc.issue(Uuid::new_v4(), "b@example.com", Role::Perfumer).unwrap();

        // Payload from one token with the signature of another
        let a_parts: Vec<&str> = a.access_token.split('.').collect();
        let b_parts: Vec<&str> = b.access_token.split('.').collect();
        let spliced = format!("{}.{}.{}", a_parts[0], a_parts[1], b_parts[2]);

        let result = svc.verify(&spliced);
        assert!(matches!(result.unwrap_err(), AppError::TamperedToken));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let issued = service()
            .issue(Uuid::new_v4(), "b@example.com", Role::Buyer)
            .unwrap();

        let other = TokenService::new(b"another-secret-key-with-32-chars!!!", 24);
        let result = other.verify(&issued.access_token);
        assert!(matches!(result.unwrap_err(), AppError::TamperedToken));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = service().verify("not-a-token");
        assert!(matches!(result.unwrap_err(), AppError::TamperedToken));
    }
}
