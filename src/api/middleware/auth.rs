//! JWT authentication middleware.
//!
//! The middleware runs on every request: when a valid bearer token is
//! present it stores an `AuthUser` in request extensions. Handlers that
//! need authentication extract `AuthUser` directly, which rejects with
//! 401 when nothing was stored.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Role;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Authenticated user information extracted from JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID from JWT claims
    pub id: Uuid,
    /// User email from JWT claims
    pub email: String,
    /// User role from JWT claims
    pub role: Role,
}

impl AuthUser {
    /// Rejects callers that are not admins.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role != Role::Admin {
            return Err(AppError::Forbidden {
                message: "Administrator access required".to_string(),
            });
        }
        Ok(())
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> AppResult<Self> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized {
                message: "Authentication required".to_string(),
            })
    }
}

/// Optional JWT authentication middleware.
///
/// If a valid access token is provided, the user lands in request
/// extensions; otherwise the request continues anonymously and protected
/// handlers fail at extraction time.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(auth_header) = request.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                if let Ok(claims) = validate_access_token(token, &state.jwt_config.secret) {
                    if let Ok(auth_user) = AuthUser::try_from(claims) {
                        request.extensions_mut().insert(auth_user);
                    }
                }
            }
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;

    fn test_claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "test@example.com".to_string(),
            role: Role::Customer,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn auth_user_from_claims() {
        let id = "3e7c07d2-4f2a-4d05-b9a0-9f5b2c2e9a01";
        let auth_user = AuthUser::try_from(test_claims(id)).unwrap();
        assert_eq!(auth_user.id.to_string(), id);
        assert_eq!(auth_user.email, "test@example.com");
        assert_eq!(auth_user.role, Role::Customer);
    }

    #[test]
    fn auth_user_from_claims_invalid_id() {
        let result = AuthUser::try_from(test_claims("not-a-uuid"));
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn require_admin_rejects_customers() {
        let user = AuthUser {
            id: Uuid::nil(),
            email: "c@example.com".to_string(),
            role: Role::Customer,
        };
        assert!(user.require_admin().is_err());

        let admin = AuthUser {
            id: Uuid::nil(),
            email: "a@example.com".to_string(),
            role: Role::Admin,
        };
        assert!(admin.require_admin().is_ok());
    }
}
