use crate::error::{AppError, AppResult};
use crate::models::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token purpose enumeration.
///
/// Reset and verification tokens reuse the same signing machinery as the
/// auth pair but are rejected everywhere except their dedicated endpoints.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
    /// Password reset token
    Reset,
    /// Email verification token
    Verification,
}

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user UUID)
    pub sub: String,
    /// User email
    pub email: String,
    /// User role
    pub role: Role,
    /// Token type
    pub token_type: TokenType,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user
    pub fn new(
        user_id: Uuid,
        email: String,
        role: Role,
        token_type: TokenType,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email,
            role,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> AppResult<Uuid> {
        self.sub.parse().map_err(|_| AppError::Unauthorized {
            message: "Invalid user ID in token".to_string(),
        })
    }
}

/// Generates a JWT token for a user
pub fn generate_token(
    user_id: Uuid,
    email: String,
    role: Role,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, email, role, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates both access and refresh tokens
pub fn generate_token_pair(
    user_id: Uuid,
    email: String,
    role: Role,
    secret: &str,
    access_expiration_hours: i64,
    refresh_expiration_hours: i64,
) -> AppResult<(String, String)> {
    let access_token = generate_token(
        user_id,
        email.clone(),
        role,
        TokenType::Access,
        secret,
        access_expiration_hours,
    )?;

    let refresh_token = generate_token(
        user_id,
        email,
        role,
        TokenType::Refresh,
        secret,
        refresh_expiration_hours,
    )?;

    Ok((access_token, refresh_token))
}

/// Validates and decodes a JWT token
///
/// # Arguments
/// * `token` - The JWT token string to validate
/// * `secret` - The secret key for verifying the token
/// * `expected_type` - Optional expected token type to validate against
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })?;

    if let Some(expected) = expected_type {
        if claims.token_type != expected {
            return Err(AppError::Unauthorized {
                message: format!(
                    "Invalid token type: expected {:?}, got {:?}",
                    expected, claims.token_type
                ),
            });
        }
    }

    Ok(claims)
}

/// Validates an access token
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

/// Validates a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

/// Validates a password reset token
pub fn validate_reset_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Reset))
}

/// Validates an email verification token
pub fn validate_verification_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Verification))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing";

    fn test_user_id() -> Uuid {
        Uuid::parse_str("3e7c07d2-4f2a-4d05-b9a0-9f5b2c2e9a01").unwrap()
    }

    #[test]
    fn test_generate_token() {
        let token = generate_token(
            test_user_id(),
            "test@example.com".to_string(),
            Role::Customer,
            TokenType::Access,
            TEST_SECRET,
            24,
        );

        assert!(token.is_ok());
        let token_str = token.unwrap();
        assert!(!token_str.is_empty());
        assert!(token_str.contains('.'));
    }

    #[test]
    fn test_generate_token_pair() {
        let result = generate_token_pair(
            test_user_id(),
            "test@example.com".to_string(),
            Role::Customer,
            TEST_SECRET,
            1,
            168,
        );

        assert!(result.is_ok());
        let (access_token, refresh_token) = result.unwrap();
        assert!(!access_token.is_empty());
        assert!(!refresh_token.is_empty());
        assert_ne!(access_token, refresh_token);
    }

    #[test]
    fn test_validate_token_success() {
        let token = generate_token(
            test_user_id(),
            "test@example.com".to_string(),
            Role::ServiceProvider,
            TokenType::Access,
            TEST_SECRET,
            24,
        )
        .unwrap();

        let claims = validate_token(&token, TEST_SECRET, None).unwrap();
        assert_eq!(claims.sub, test_user_id().to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, Role::ServiceProvider);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.user_id().unwrap(), test_user_id());
    }

    #[test]
    fn test_validate_wrong_token_type() {
        let access_token = generate_token(
            test_user_id(),
            "test@example.com".to_string(),
            Role::Customer,
            TokenType::Access,
            TEST_SECRET,
            1,
        )
        .unwrap();

        // An access token must not be usable as a refresh token
        let result = validate_refresh_token(&access_token, TEST_SECRET);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("Invalid token type"));
        } else {
            panic!("Expected Unauthorized error for wrong token type");
        }
    }

    #[test]
    fn test_reset_token_rejected_as_access() {
        let reset_token = generate_token(
            test_user_id(),
            "test@example.com".to_string(),
            Role::Customer,
            TokenType::Reset,
            TEST_SECRET,
            1,
        )
        .unwrap();

        assert!(validate_access_token(&reset_token, TEST_SECRET).is_err());
        assert!(validate_reset_token(&reset_token, TEST_SECRET).is_ok());
    }

    #[test]
    fn test_verification_token_round_trip() {
        let token = generate_token(
            test_user_id(),
            "test@example.com".to_string(),
            Role::Customer,
            TokenType::Verification,
            TEST_SECRET,
            24,
        )
        .unwrap();

        let claims = validate_verification_token(&token, TEST_SECRET).unwrap();
        assert_eq!(claims.token_type, TokenType::Verification);
    }

    #[test]
    fn test_validate_token_invalid_secret() {
        let token = generate_token(
            test_user_id(),
            "test@example.com".to_string(),
            Role::Customer,
            TokenType::Access,
            TEST_SECRET,
            24,
        )
        .unwrap();

        let result = validate_token(&token, "wrong_secret", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        let token = generate_token(
            test_user_id(),
            "test@example.com".to_string(),
            Role::Customer,
            TokenType::Access,
            TEST_SECRET,
            -1, // Negative hours to create an already expired token
        )
        .unwrap();

        let result = validate_token(&token, TEST_SECRET, None);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("expired"));
        } else {
            panic!("Expected Unauthorized error for expired token");
        }
    }

    #[test]
    fn test_invalid_user_id_in_claims() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            email: "test@example.com".to_string(),
            role: Role::Customer,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        };

        assert!(claims.user_id().is_err());
    }

    #[test]
    fn test_token_type_serialization() {
        let claims = Claims::new(
            test_user_id(),
            "test@example.com".to_string(),
            Role::Customer,
            TokenType::Refresh,
            168,
        );

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"token_type\":\"refresh\""));
        assert!(json.contains("\"role\":\"customer\""));
    }
}
