//! Authentication service - Handles login and token verification.
//!
//! SOLID (SRP): Handles authentication concerns only.
//! DDD: Uses domain Password value object for hashing and the
//! WorkWindow value object for the technician login gate.
//!
//! The gate runs three checks in a fixed order: credentials first,
//! then the account-active flag, then the work window (technicians
//! only). A caller can therefore rely on `AccountDisabled` meaning
//! "the password was right".

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User, UserRole, WorkWindow};
use crate::errors::{AppError, AppResult};
use crate::infra::{Clock, UserRepository};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
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

/// Identity established by a successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Run the full login gate and return the caller's identity
    async fn authenticate(&self, email: String, password: String) -> AppResult<AuthenticatedUser>;

    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for an authenticated user
fn generate_token(user: &AuthenticatedUser, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService.
///
/// Time is injected so the work-window check is testable.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    config: Config,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>, config: Config) -> Self {
        Self {
            users,
            clock,
            config,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, email: String, password: String) -> AppResult<AuthenticatedUser> {
        let user_result = self.users.find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't
        // exist to prevent timing attacks that could enumerate valid
        // emails.
        let stored_password = match &user_result {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::always_fail(),
        };
        let password_valid = stored_password.verify(&password);

        let Some(user) = user_result else {
            return Err(AppError::InvalidCredentials);
        };
        if !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        // Technicians may log in only inside their configured window
        if user.role.is_technician() {
            if let Some(raw) = user.work_hours.as_deref() {
                let raw = raw.trim();
                if !raw.is_empty() {
                    match WorkWindow::parse(raw) {
                        Some(window) => {
                            let now = self.clock.now().time();
                            if !window.contains(now) {
                                return Err(AppError::OutsideWorkWindow(window));
                            }
                        }
                        // A window nobody can parse must not lock the
                        // account out
                        None => tracing::warn!(
                            email = %user.email,
                            work_hours = raw,
                            "ignoring malformed work hours"
                        ),
                    }
                }
            }
        }

        Ok(AuthenticatedUser::from(user))
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.authenticate(email, password).await?;
        generate_token(&user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    use crate::infra::MockUserRepository;

    /// Clock pinned to a single instant
    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn at(hour: u32, minute: u32) -> Arc<FixedClock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 8, 18, hour, minute, 0).unwrap(),
        ))
    }

    fn technician(password: &str, work_hours: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "tech@shop.example".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            name: "Tess Technician".to_string(),
            role: UserRole::Technician,
            is_active: true,
            work_hours: work_hours.map(str::to_string),
            target: None,
            bonus: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn authenticator(user: Option<User>, clock: Arc<FixedClock>) -> Authenticator {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(user.clone()));
        Authenticator::new(Arc::new(users), clock, Config::for_tests())
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let auth = authenticator(None, at(12, 0));

        let result = auth
            .authenticate("ghost@shop.example".into(), "Password123!".into())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let user = technician("Password123!", None);
        let auth = authenticator(Some(user), at(12, 0));

        let result = auth
            .authenticate("tech@shop.example".into(), "WrongPassword1".into())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn disabled_account_is_rejected_after_password_check() {
        let mut user = technician("Password123!", None);
        user.is_active = false;
        let auth = authenticator(Some(user), at(12, 0));

        let result = auth
            .authenticate("tech@shop.example".into(), "Password123!".into())
            .await;

        assert!(matches!(result, Err(AppError::AccountDisabled)));
    }

    #[tokio::test]
    async fn disabled_account_with_wrong_password_stays_invalid_credentials() {
        // Credential failure must win over the disabled flag
        let mut user = technician("Password123!", None);
        user.is_active = false;
        let auth = authenticator(Some(user), at(12, 0));

        let result = auth
            .authenticate("tech@shop.example".into(), "WrongPassword1".into())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn technician_may_log_in_at_window_start() {
        let user = technician("Password123!", Some("09:00-17:00"));
        let auth = authenticator(Some(user), at(9, 0));

        let result = auth
            .authenticate("tech@shop.example".into(), "Password123!".into())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn technician_may_log_in_at_window_end() {
        let user = technician("Password123!", Some("09:00-17:00"));
        let auth = authenticator(Some(user), at(17, 0));

        let result = auth
            .authenticate("tech@shop.example".into(), "Password123!".into())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn technician_is_blocked_one_minute_before_window() {
        let user = technician("Password123!", Some("09:00-17:00"));
        let auth = authenticator(Some(user), at(8, 59));

        let result = auth
            .authenticate("tech@shop.example".into(), "Password123!".into())
            .await;

        assert!(matches!(result, Err(AppError::OutsideWorkWindow(_))));
    }

    #[tokio::test]
    async fn technician_is_blocked_one_minute_after_window() {
        let user = technician("Password123!", Some("09:00-17:00"));
        let auth = authenticator(Some(user), at(17, 1));

        let result = auth
            .authenticate("tech@shop.example".into(), "Password123!".into())
            .await;

        assert!(matches!(result, Err(AppError::OutsideWorkWindow(_))));
    }

    #[tokio::test]
    async fn malformed_work_hours_do_not_block_login() {
        let user = technician("Password123!", Some("whenever"));
        let auth = authenticator(Some(user), at(3, 0));

        let result = auth
            .authenticate("tech@shop.example".into(), "Password123!".into())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn blank_work_hours_mean_no_restriction() {
        let user = technician("Password123!", Some("  "));
        let auth = authenticator(Some(user), at(3, 0));

        let result = auth
            .authenticate("tech@shop.example".into(), "Password123!".into())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn admin_is_not_subject_to_the_work_window() {
        let mut user = technician("Password123!", Some("09:00-17:00"));
        user.role = UserRole::Admin;
        let auth = authenticator(Some(user), at(3, 0));

        let result = auth
            .authenticate("tech@shop.example".into(), "Password123!".into())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn login_issues_a_verifiable_bearer_token() {
        let user = technician("Password123!", Some("09:00-17:00"));
        let expected_id = user.id;
        let auth = authenticator(Some(user), at(10, 30));

        let token = auth
            .login("tech@shop.example".into(), "Password123!".into())
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, expected_id);
        assert_eq!(claims.role, "technician");
        assert_eq!(claims.name, "Tess Technician");
    }
}
