//! User service - Account administration.
//!
//! SOLID (SRP): Handles user CRUD concerns only; the login gate lives
//! in the auth service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::is_valid_role;
use crate::domain::{CreateUser, NewUser, Password, UpdateUser, User, UserChanges, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create a new account
    async fn create_user(&self, data: CreateUser) -> AppResult<User>;

    /// Apply a partial update to an account
    async fn update_user(&self, id: Uuid, data: UpdateUser) -> AppResult<User>;

    /// Remove an account
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn create_user(&self, data: CreateUser) -> AppResult<User> {
        if !is_valid_role(&data.role) {
            return Err(AppError::validation(format!("Unknown role: {}", data.role)));
        }
        if self.repo.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let role = UserRole::from(data.role.as_str());
        let password_hash = Password::new(&data.password)?.into_string();

        // Sales targets only apply to technicians
        let (target, bonus) = if role.is_technician() {
            (data.target, data.bonus)
        } else {
            (None, None)
        };

        self.repo
            .create(NewUser {
                email: data.email,
                password_hash,
                name: data.name,
                role,
                work_hours: data.work_hours,
                target,
                bonus,
            })
            .await
    }

    async fn update_user(&self, id: Uuid, data: UpdateUser) -> AppResult<User> {
        if let Some(role) = data.role.as_deref() {
            if !is_valid_role(role) {
                return Err(AppError::validation(format!("Unknown role: {}", role)));
            }
        }
        if let Some(email) = data.email.as_deref() {
            if let Some(existing) = self.repo.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::conflict("A user with this email already exists"));
                }
            }
        }

        let role = data.role.as_deref().map(UserRole::from);

        // The window arrives either preformatted or as a start/end pair
        let work_hours = match (data.start_hour.as_deref(), data.end_hour.as_deref()) {
            (Some(start), Some(end)) => Some(Some(format!("{}-{}", start.trim(), end.trim()))),
            _ => data.work_hours.map(Some),
        };

        let password_hash = match data.password.as_deref() {
            Some(p) if !p.trim().is_empty() => Some(Password::new(p)?.into_string()),
            _ => None,
        };

        // Leaving the technician role clears technician-only fields
        let (target, bonus) = match role {
            Some(r) if !r.is_technician() => (Some(None), Some(None)),
            _ => (data.target.map(Some), data.bonus.map(Some)),
        };

        self.repo
            .update(
                id,
                UserChanges {
                    email: data.email,
                    password_hash,
                    name: data.name,
                    role,
                    is_active: data.is_active,
                    work_hours,
                    target,
                    bonus,
                },
            )
            .await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await
    }
}
