//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_RECEPTIONIST, ROLE_TECHNICIAN};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Technician,
    Receptionist,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role is subject to the work-hours login window
    pub fn is_technician(&self) -> bool {
        matches!(self, UserRole::Technician)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_TECHNICIAN => UserRole::Technician,
            _ => UserRole::Receptionist,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Technician => write!(f, "{}", ROLE_TECHNICIAN),
            UserRole::Receptionist => write!(f, "{}", ROLE_RECEPTIONIST),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    /// Disabled accounts cannot log in
    pub is_active: bool,
    /// Daily login window for technicians, formatted "HH:MM-HH:MM"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_hours: Option<String>,
    /// Monthly revenue target (technicians only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i32>,
    /// Bonus percentage over target (technicians only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Actor context derived from this user
    pub fn as_actor(&self) -> Actor {
        Actor {
            id: self.id,
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Identity of the user performing an operation.
///
/// Carried explicitly into the service layer so permission decisions
/// never depend on ambient session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub role: UserRole,
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    /// User email address
    #[schema(example = "tech@shop.example")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User role
    #[schema(example = "technician")]
    pub role: String,
    /// Login window, formatted "HH:MM-HH:MM"
    #[schema(example = "09:00-17:00")]
    pub work_hours: Option<String>,
    /// Monthly revenue target (technicians only)
    pub target: Option<i32>,
    /// Bonus percentage over target (technicians only)
    pub bonus: Option<i32>,
}

/// User update data transfer object.
///
/// Absent fields are left untouched. The login window can be supplied
/// either as a preformatted `work_hours` string or as a
/// `start_hour`/`end_hour` pair.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    /// New display name
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    /// New email address
    pub email: Option<String>,
    /// New role
    #[schema(example = "admin")]
    pub role: Option<String>,
    /// New password (replaces the stored hash)
    pub password: Option<String>,
    /// Enable or disable the account
    pub is_active: Option<bool>,
    /// Full login window, formatted "HH:MM-HH:MM"
    #[schema(example = "09:00-17:00")]
    pub work_hours: Option<String>,
    /// Window start, formatted "HH:MM"
    #[schema(example = "09:00")]
    pub start_hour: Option<String>,
    /// Window end, formatted "HH:MM"
    #[schema(example = "17:00")]
    pub end_hour: Option<String>,
    /// Monthly revenue target (technicians only)
    pub target: Option<i32>,
    /// Bonus percentage over target (technicians only)
    pub bonus: Option<i32>,
}

/// Insert data handed to the user repository (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub work_hours: Option<String>,
    pub target: Option<i32>,
    pub bonus: Option<i32>,
}

/// Column-level changes handed to the user repository.
///
/// Outer `None` leaves the column untouched; `Some(None)` clears a
/// nullable column.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
    pub work_hours: Option<Option<String>>,
    pub target: Option<Option<i32>>,
    pub bonus: Option<Option<i32>>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "tech@shop.example")]
    pub email: String,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User role
    #[schema(example = "technician")]
    pub role: String,
    /// Whether the account may log in
    pub is_active: bool,
    /// Login window, formatted "HH:MM-HH:MM"
    #[schema(example = "09:00-17:00")]
    pub work_hours: Option<String>,
    /// Monthly revenue target (technicians only)
    pub target: Option<i32>,
    /// Bonus percentage over target (technicians only)
    pub bonus: Option<i32>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            is_active: user.is_active,
            work_hours: user.work_hours,
            target: user.target,
            bonus: user.bonus,
            created_at: user.created_at,
        }
    }
}
