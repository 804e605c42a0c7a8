//! Token service: issuance and verification of signed session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use gatherly_core::AccountId;

use crate::claims::{Claims, validate_claims};
use crate::gate::{AuthError, Identity};
use crate::Role;

/// A compact signed token, ready to hand to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Display for SignedToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues and verifies HS256-signed session tokens.
///
/// Tokens carry subject, role, and a fixed absolute expiry (1 hour by
/// default). There is no refresh or revocation: expiry forces
/// re-authentication, and a role change after issuance only takes effect once
/// the outstanding token ages out.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Default token lifetime: 1 hour.
    pub fn default_ttl() -> Duration {
        Duration::hours(1)
    }

    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Self::default_ttl(),
        }
    }

    /// Override the token lifetime (tests use this to mint expired tokens).
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a signed token for an account.
    ///
    /// The signature covers subject, role, and both timestamps.
    pub fn issue(&self, account_id: AccountId, role: Role) -> Result<SignedToken, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id,
            role,
            iat: now,
            exp: now + self.ttl,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::Issuance)?;
        Ok(SignedToken(token))
    }

    /// Verify a token and resolve the identity it asserts.
    ///
    /// Fails closed: malformed input, a bad signature, or an expired window
    /// all collapse into `InvalidToken`. The role comes exclusively from the
    /// verified claims, never from anything else the caller supplied.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        validate_claims(&data.claims, Utc::now()).map_err(|_| AuthError::InvalidToken)?;

        Ok(Identity {
            account_id: data.claims.sub,
            role: data.claims.role,
        })
    }
}
