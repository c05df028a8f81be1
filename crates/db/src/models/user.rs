//! User entity model and DTOs.

use lisan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash. NEVER serialize this to API responses
/// directly; convert to [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub is_verified: bool,
    pub is_premium: bool,
    pub xp: i64,
    pub total_xp: i64,
    pub level: i32,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub is_verified: bool,
    pub is_premium: bool,
    pub xp: i64,
    pub total_xp: i64,
    pub level: i32,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            full_name: u.full_name,
            avatar_url: u.avatar_url,
            role: u.role,
            is_verified: u.is_verified,
            is_premium: u.is_premium,
            xp: u.xp,
            total_xp: u.total_xp,
            level: u.level,
            last_login_at: u.last_login_at,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// DTO for inserting a user. The password must already be hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: String,
    pub is_verified: bool,
}

/// Partial update of a user row. `None` fields are left untouched.
///
/// XP counters are deliberately absent; they change only through the XP
/// engine so the stored level stays consistent.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
    pub is_verified: Option<bool>,
    pub is_premium: Option<bool>,
    pub password_hash: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.username.is_none()
            && self.full_name.is_none()
            && self.avatar_url.is_none()
            && self.role.is_none()
            && self.is_verified.is_none()
            && self.is_premium.is_none()
            && self.password_hash.is_none()
    }
}

/// Columns `GET /users` may sort by.
pub const USER_SORT_COLUMNS: &[&str] = &[
    "created_at",
    "updated_at",
    "level",
    "xp",
    "total_xp",
    "username",
    "email",
    "full_name",
];

/// Filters for the admin user listing.
#[derive(Debug, Default)]
pub struct UserFilter {
    /// Pre-built `ILIKE` pattern matched against email, username and full name.
    pub search: Option<String>,
    pub role: Option<String>,
    pub is_premium: Option<bool>,
    pub is_verified: Option<bool>,
}

/// XP counters read under a row lock by the XP engine.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct XpState {
    pub xp: i64,
    pub total_xp: i64,
    pub level: i32,
}

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStats {
    pub total_users: i64,
    pub verified_users: i64,
    pub premium_users: i64,
    pub admins: i64,
    /// Users past level 1.
    pub active_users: i64,
    /// Users who logged in since midnight UTC.
    pub active_today: i64,
}
