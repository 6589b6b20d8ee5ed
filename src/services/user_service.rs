//! User accounts: registration, authentication, token rotation and profile
//! management.
//!
//! Refresh tokens are stored hashed (argon2) and rotated on every refresh,
//! so a stolen database row cannot mint new sessions.

use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Business, NewBusiness, NewUser, Role, UpdateUser, User};
use crate::repositories::{BusinessRepository, UserRepository};
use crate::services::notifications::{NotificationService, Recipient};
use crate::utils::jwt::{
    TokenType, generate_token, generate_token_pair, validate_refresh_token, validate_reset_token,
    validate_verification_token,
};
use crate::utils::password::{hash_password, verify_password};

/// Registration data common to all account types
#[derive(Debug, Clone)]
pub struct RegisterCustomerInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// Registration data for a service provider and their business
#[derive(Debug, Clone)]
pub struct RegisterProviderInput {
    pub account: RegisterCustomerInput,
    pub business_name: Option<String>,
    pub business_kind: Option<String>,
    pub business_description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// A freshly issued access/refresh pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    businesses: BusinessRepository,
    notifications: NotificationService,
}

impl UserService {
    pub fn new(
        users: UserRepository,
        businesses: BusinessRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            users,
            businesses,
            notifications,
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers a customer account and signs them in.
    pub async fn register_customer(
        &self,
        input: RegisterCustomerInput,
        jwt: &JwtConfig,
    ) -> AppResult<(User, TokenPair)> {
        self.reject_duplicate_email(&input.email).await?;

        let new_user = NewUser {
            email: input.email,
            password: hash_password(&input.password)?,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            role: Role::Customer,
            is_active: true,
        };

        let user = self.users.create(new_user).await?;
        let tokens = self.issue_tokens(&user, jwt).await?;

        self.send_welcome(&user).await;
        self.send_verification(&user, jwt).await;

        Ok((user, tokens))
    }

    /// Registers a service provider and their business in one transaction.
    pub async fn register_provider(
        &self,
        input: RegisterProviderInput,
        jwt: &JwtConfig,
    ) -> AppResult<(User, Business, TokenPair)> {
        self.reject_duplicate_email(&input.account.email).await?;

        let first_name = input.account.first_name.clone();
        let email = input.account.email.clone();
        let phone = input.account.phone.clone();

        let new_user = NewUser {
            email: input.account.email,
            password: hash_password(&input.account.password)?,
            first_name: input.account.first_name,
            last_name: input.account.last_name,
            phone: input.account.phone,
            role: Role::ServiceProvider,
            is_active: true,
        };

        // User + business must land together (or not at all)
        let (user, business) = self
            .users
            .create_with_business(new_user, move |user_id| NewBusiness {
                user_id,
                name: input
                    .business_name
                    .unwrap_or_else(|| format!("{}'s Business", first_name)),
                kind: input
                    .business_kind
                    .unwrap_or_else(|| "Car Wash Service".to_string()),
                description: input
                    .business_description
                    .unwrap_or_else(|| "Car washing and detailing services".to_string()),
                address: input.address.unwrap_or_default(),
                city: input.city.unwrap_or_default(),
                state: input.state.unwrap_or_default(),
                zip_code: input.zip_code.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
                email,
                image: None,
            })
            .await?;

        let tokens = self.issue_tokens(&user, jwt).await?;

        self.send_welcome(&user).await;
        self.send_verification(&user, jwt).await;

        Ok((user, business, tokens))
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Authenticates with email and password, issuing a fresh token pair.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        jwt: &JwtConfig,
    ) -> AppResult<(User, TokenPair)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(Self::invalid_credentials)?;

        if !verify_password(password, &user.password)? {
            return Err(Self::invalid_credentials());
        }

        if !user.is_active {
            return Err(AppError::Forbidden {
                message: "Account is deactivated".to_string(),
            });
        }

        let tokens = self.issue_tokens(&user, jwt).await?;
        Ok((user, tokens))
    }

    /// Rotates a refresh token: validates the JWT, compares it against the
    /// stored hash, then issues and stores a new pair.
    pub async fn refresh_tokens(
        &self,
        refresh_token: &str,
        jwt: &JwtConfig,
    ) -> AppResult<TokenPair> {
        let claims = validate_refresh_token(refresh_token, &jwt.secret)?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(Self::access_denied)?;

        let stored_hash = user
            .hashed_refresh_token
            .as_deref()
            .ok_or_else(Self::access_denied)?;

        if !user.is_active {
            return Err(AppError::Forbidden {
                message: "Account is deactivated".to_string(),
            });
        }

        if !verify_password(refresh_token, stored_hash)? {
            return Err(Self::access_denied());
        }

        self.issue_tokens(&user, jwt).await
    }

    /// Signs the user out by clearing the stored refresh-token hash.
    pub async fn logout(&self, user_id: Uuid) -> AppResult<()> {
        self.users.set_refresh_token(user_id, None).await
    }

    // ========================================================================
    // Password reset and email verification
    // ========================================================================

    /// Starts a password reset. Never reveals whether the email exists.
    pub async fn forgot_password(&self, email: &str, jwt: &JwtConfig) -> AppResult<()> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(());
        };

        let token = generate_token(
            user.id,
            user.email.clone(),
            user.role,
            TokenType::Reset,
            &jwt.secret,
            1,
        )?;

        self.notifications
            .send_direct(
                Self::recipient(&user),
                "Password Reset",
                &format!(
                    "Hi {}, use this token to reset your password: {}",
                    user.first_name, token
                ),
            )
            .await;

        Ok(())
    }

    /// Completes a password reset and signs the user out of all devices.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        jwt: &JwtConfig,
    ) -> AppResult<()> {
        let claims = validate_reset_token(token, &jwt.secret)
            .map_err(|_| Self::invalid_token("Invalid or expired token"))?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.email == claims.email)
            .ok_or_else(|| Self::invalid_token("Invalid or expired token"))?;

        let password_hash = hash_password(new_password)?;
        self.users.set_password(user.id, &password_hash).await?;
        self.users.set_refresh_token(user.id, None).await?;

        Ok(())
    }

    /// Verifies an email address. Idempotent when already verified.
    pub async fn verify_email(&self, token: &str, jwt: &JwtConfig) -> AppResult<&'static str> {
        let claims = validate_verification_token(token, &jwt.secret)
            .map_err(|_| Self::invalid_token("Invalid or expired verification token"))?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.email == claims.email)
            .ok_or_else(|| Self::invalid_token("Invalid or expired verification token"))?;

        if user.email_verified_at.is_some() {
            return Ok("Email is already verified");
        }

        self.users.mark_email_verified(user.id).await?;
        self.send_welcome(&user).await;

        Ok("Email verified successfully")
    }

    /// Resends the verification email. Never reveals whether the email
    /// exists or is already verified beyond a generic message.
    pub async fn resend_verification(&self, email: &str, jwt: &JwtConfig) -> AppResult<()> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(());
        };

        if user.email_verified_at.is_some() {
            return Ok(());
        }

        self.send_verification(&user, jwt).await;
        Ok(())
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "user".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    pub async fn update_profile(&self, id: Uuid, update: UpdateUser) -> AppResult<User> {
        self.get_user(id).await?;
        self.users.update_profile(id, update).await
    }

    pub async fn list_users(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        self.users.list_paginated(offset, limit).await
    }

    pub async fn deactivate(&self, id: Uuid) -> AppResult<User> {
        self.get_user(id).await?;
        self.users.set_active(id, false).await
    }

    /// Finds the business owned by a provider account.
    pub async fn business_of(&self, user_id: Uuid) -> AppResult<Option<Business>> {
        self.businesses.find_by_user_id(user_id).await
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    async fn reject_duplicate_email(&self, email: &str) -> AppResult<()> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::Duplicate {
                entity: "user".to_string(),
                field: "email".to_string(),
                value: email.to_string(),
            });
        }
        Ok(())
    }

    /// Issues a token pair and stores the refresh token's hash.
    async fn issue_tokens(&self, user: &User, jwt: &JwtConfig) -> AppResult<TokenPair> {
        let (access_token, refresh_token) = generate_token_pair(
            user.id,
            user.email.clone(),
            user.role,
            &jwt.secret,
            jwt.access_token_expiration,
            jwt.refresh_token_expiration,
        )?;

        let hashed = hash_password(&refresh_token)?;
        self.users.set_refresh_token(user.id, Some(hashed)).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn recipient(user: &User) -> Recipient {
        Recipient {
            email: Some(user.email.clone()),
            phone: user.phone.clone(),
        }
    }

    async fn send_welcome(&self, user: &User) {
        self.notifications
            .send_direct(
                Self::recipient(user),
                "Welcome to Washhub",
                &format!(
                    "Hi {}, your account has been created. Happy washing!",
                    user.first_name
                ),
            )
            .await;
    }

    async fn send_verification(&self, user: &User, jwt: &JwtConfig) {
        let token = match generate_token(
            user.id,
            user.email.clone(),
            user.role,
            TokenType::Verification,
            &jwt.secret,
            24,
        ) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Failed to create verification token");
                return;
            }
        };

        self.notifications
            .send_direct(
                Self::recipient(user),
                "Verify your email",
                &format!(
                    "Hi {}, use this token to verify your email address: {}",
                    user.first_name, token
                ),
            )
            .await;
    }

    fn invalid_credentials() -> AppError {
        AppError::Unauthorized {
            message: "Invalid credentials".to_string(),
        }
    }

    fn access_denied() -> AppError {
        AppError::Forbidden {
            message: "Access denied".to_string(),
        }
    }

    fn invalid_token(message: &str) -> AppError {
        AppError::Unauthorized {
            message: message.to_string(),
        }
    }
}
