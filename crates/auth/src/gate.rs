//! Access gate: the request-authorization decision function.

use serde::Serialize;
use thiserror::Error;

use gatherly_core::AccountId;

use crate::token::TokenService;
use crate::Role;

/// A resolved caller identity, produced by a successful gate decision.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub account_id: AccountId,
    pub role: Role,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token was presented.
    #[error("authentication required")]
    Unauthenticated,

    /// The token was malformed, forged, or expired.
    #[error("invalid token")]
    InvalidToken,

    /// The caller is authenticated but its role is not in the allow-list.
    #[error("insufficient permissions")]
    Forbidden,

    /// Token issuance failed (never caused by caller input).
    #[error("token issuance failed")]
    Issuance,
}

/// Authorize a request given its bearer token and a role allow-list.
///
/// - No IO
/// - No panics
/// - No persistence reads (the only collaborator is the token service)
///
/// An empty allow-list admits any authenticated caller; a non-empty one
/// requires the resolved role to be a member. Called explicitly once per
/// operation, before any mutation.
pub fn authorize(
    token: Option<&str>,
    allowed: &[Role],
    tokens: &TokenService,
) -> Result<Identity, AuthError> {
    let token = token.ok_or(AuthError::Unauthenticated)?;
    let identity = tokens.verify(token)?;

    if !allowed.is_empty() && !allowed.contains(&identity.role) {
        return Err(AuthError::Forbidden);
    }

    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"gate-test-secret")
    }

    fn minted(svc: &TokenService, role: Role) -> String {
        svc.issue(AccountId::new(), role).unwrap().into_string()
    }

    #[test]
    fn missing_token_is_unauthenticated() {
        let svc = service();
        assert_eq!(
            authorize(None, &[], &svc),
            Err(AuthError::Unauthenticated)
        );
    }

    #[test]
    fn garbage_token_is_invalid() {
        let svc = service();
        assert_eq!(
            authorize(Some("garbage"), &[], &svc),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn empty_allow_list_admits_any_authenticated_caller() {
        let svc = service();
        let token = minted(&svc, Role::Volunteer);
        let identity = authorize(Some(&token), &[], &svc).unwrap();
        assert_eq!(identity.role, Role::Volunteer);
    }

    #[test]
    fn role_outside_allow_list_is_forbidden() {
        let svc = service();
        let token = minted(&svc, Role::User);
        assert_eq!(
            authorize(Some(&token), &[Role::Manager], &svc),
            Err(AuthError::Forbidden)
        );
    }

    #[test]
    fn role_inside_allow_list_is_admitted() {
        let svc = service();
        let token = minted(&svc, Role::Manager);
        let identity = authorize(Some(&token), &[Role::Manager, Role::Admin], &svc).unwrap();
        assert_eq!(identity.role, Role::Manager);
    }
}
