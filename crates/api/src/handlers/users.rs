//! User profile and admin user management.

use axum::extract::State;
use lisan_core::accounts::{normalize_email, validate_password, validate_username};
use lisan_core::gamification::XpGrant;
use lisan_core::roles::{validate_role, ROLE_USER};
use lisan_core::search::like_pattern;
use lisan_core::types::DbId;
use lisan_db::models::achievement::Achievement;
use lisan_db::models::user::{CreateUser, UpdateUser, UserFilter, UserResponse, UserStats};
use lisan_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::engine::xp::add_xp;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::auth::hash_or_internal;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PageParams, SortParams};
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub search: Option<String>,
    pub role: Option<String>,
    pub is_premium: Option<bool>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminCreateUserRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
    /// Admin-created accounts are verified unless stated otherwise.
    pub is_verified: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AdminUpdateUserRequest {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_verified: Option<bool>,
    pub is_premium: Option<bool>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GrantXpRequest {
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct GrantXpResponse {
    #[serde(flatten)]
    pub grant: XpGrant,
    pub achievements_unlocked: Vec<Achievement>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Normalize the identity fields of an update and reject values another
/// account already uses.
async fn check_identity(
    state: &AppState,
    update: &mut UpdateUser,
    exclude_id: DbId,
) -> AppResult<()> {
    if let Some(email) = update.email.as_deref() {
        update.email = Some(normalize_email(email)?);
    }
    if let Some(username) = update.username.as_deref() {
        let username = username.trim().to_string();
        validate_username(&username)?;
        update.username = Some(username);
    }
    if update.email.is_none() && update.username.is_none() {
        return Ok(());
    }

    let clash = UserRepo::find_identity_clash(
        &state.pool,
        update.email.as_deref(),
        update.username.as_deref(),
        Some(exclude_id),
    )
    .await?;
    if clash.email_taken {
        return Err(AppError::conflict("Email is already registered"));
    }
    if clash.username_taken {
        return Err(AppError::conflict("Username is already taken"));
    }
    Ok(())
}

async fn apply_update(state: &AppState, id: DbId, update: UpdateUser) -> AppResult<UserResponse> {
    if update.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(user.into())
}

// ---------------------------------------------------------------------------
// Self-service
// ---------------------------------------------------------------------------

/// PUT /api/v1/users/me
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateMeRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let mut update = UpdateUser {
        email: input.email,
        username: input.username,
        full_name: input.full_name,
        avatar_url: input.avatar_url,
        ..Default::default()
    };
    check_identity(&state, &mut update, auth.user_id).await?;

    let user = apply_update(&state, auth.user_id, update).await?;
    tracing::info!(user_id = auth.user_id, "Profile updated");
    Ok(ApiResponse::ok("Profile updated", user))
}

/// DELETE /api/v1/users/me
pub async fn delete_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<ApiResponse<()>> {
    if !UserRepo::delete(&state.pool, auth.user_id).await? {
        return Err(AppError::not_found("User", auth.user_id));
    }
    tracing::info!(user_id = auth.user_id, "Account deleted by owner");
    Ok(ApiResponse::message("Account deleted"))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(ApiResponse::ok("User retrieved", user.into()))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/users/stats
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserStats>> {
    let stats = UserRepo::stats(&state.pool).await?;
    Ok(ApiResponse::ok("User statistics retrieved", stats))
}

/// GET /api/v1/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(sort): AppQuery<SortParams>,
    AppQuery(params): AppQuery<UserListParams>,
) -> AppResult<ApiResponse<Paginated<UserResponse>>> {
    let page = page.to_request()?;
    let filter = UserFilter {
        search: like_pattern(params.search.as_deref()),
        role: params.role,
        is_premium: params.is_premium,
        is_verified: params.is_verified,
    };

    let users = UserRepo::list(
        &state.pool,
        &filter,
        sort.sort_by.as_deref(),
        sort.order(),
        &page,
    )
    .await?;
    let total = UserRepo::count(&state.pool, &filter).await?;

    let items = users.into_iter().map(UserResponse::from).collect();
    Ok(ApiResponse::ok(
        "Users retrieved",
        Paginated::new(items, &page, total),
    ))
}

/// POST /api/v1/users
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<AdminCreateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let email = normalize_email(&input.email)?;
    let username = input.username.trim();
    validate_username(username)?;
    validate_password(&input.password)?;
    let role = input.role.unwrap_or_else(|| ROLE_USER.to_string());
    validate_role(&role)?;

    let clash =
        UserRepo::find_identity_clash(&state.pool, Some(&email), Some(username), None).await?;
    if clash.email_taken {
        return Err(AppError::conflict("Email is already registered"));
    }
    if clash.username_taken {
        return Err(AppError::conflict("Username is already taken"));
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            username: username.to_string(),
            password_hash: hash_or_internal(&input.password)?,
            full_name: input.full_name,
            role,
            is_verified: input.is_verified.unwrap_or(true),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, admin_id = admin.user_id, "User created by admin");
    Ok(ApiResponse::created("User created", user.into()))
}

/// PUT /api/v1/users/{id}
///
/// XP counters cannot be edited here; use `POST /users/{id}/xp`.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AdminUpdateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    if let Some(role) = input.role.as_deref() {
        validate_role(role)?;
    }
    let password_hash = match input.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(hash_or_internal(password)?)
        }
        None => None,
    };

    let mut update = UpdateUser {
        email: input.email,
        username: input.username,
        full_name: input.full_name,
        avatar_url: None,
        role: input.role,
        is_verified: input.is_verified,
        is_premium: input.is_premium,
        password_hash,
    };
    check_identity(&state, &mut update, id).await?;

    let user = apply_update(&state, id, update).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "User updated by admin");
    Ok(ApiResponse::ok("User updated", user))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("User", id));
    }
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted by admin");
    Ok(ApiResponse::message("User deleted"))
}

/// POST /api/v1/users/{id}/xp
pub async fn grant_xp(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<GrantXpRequest>,
) -> AppResult<ApiResponse<GrantXpResponse>> {
    if input.amount <= 0 {
        return Err(AppError::BadRequest("amount must be greater than 0".into()));
    }

    let (grant, achievements_unlocked) = add_xp(&state.pool, id, input.amount).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, amount = input.amount, "Manual XP grant");

    let message = if grant.leveled_up {
        format!("XP granted. Level up to {}", grant.new_level)
    } else {
        "XP granted".to_string()
    };
    Ok(ApiResponse::ok(
        message,
        GrantXpResponse {
            grant,
            achievements_unlocked,
        },
    ))
}
