//! Registration, email verification and login.

use axum::extract::State;
use chrono::{Duration, Utc};
use lisan_core::accounts::{
    generate_verification_code, hash_verification_code, is_email_identifier, normalize_email,
    validate_password, validate_username, TOKEN_TYPE_VERIFICATION, VERIFICATION_CODE_TTL_HOURS,
};
use lisan_core::roles::ROLE_USER;
use lisan_db::models::user::{CreateUser, User, UserResponse};
use lisan_db::repositories::{UserRepo, VerificationTokenRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
}

/// `identifier` is either an email address or a username.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn hash_or_internal(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

async fn find_by_email_or_404(state: &AppState, email: &str) -> AppResult<User> {
    let email = normalize_email(email)?;
    UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No account registered for {email}")))
}

/// Store a fresh verification code for `user` and email it.
async fn issue_verification_code(state: &AppState, user: &User) -> AppResult<()> {
    let code = generate_verification_code();
    let expires_at = Utc::now() + Duration::hours(VERIFICATION_CODE_TTL_HOURS);

    VerificationTokenRepo::create(
        &state.pool,
        user.id,
        &hash_verification_code(&code),
        TOKEN_TYPE_VERIFICATION,
        expires_at,
    )
    .await?;

    let name = user.full_name.as_deref().unwrap_or(&user.username);
    state
        .mailer
        .send_verification_code(&user.email, name, &code)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = user.id, "Failed to send verification email");
            AppError::InternalError(format!("Failed to send verification email: {e}"))
        })?;

    tracing::info!(user_id = user.id, "Verification code issued");
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<ApiResponse<RegisterResponse>> {
    let email = normalize_email(&input.email)?;
    let username = input.username.trim();
    validate_username(username)?;
    validate_password(&input.password)?;

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
            full_name: input.full_name.filter(|n| !n.trim().is_empty()),
            role: ROLE_USER.to_string(),
            is_verified: false,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "User registered");

    issue_verification_code(&state, &user).await?;

    Ok(ApiResponse::created(
        "Registration successful. Check your email for the verification code",
        RegisterResponse { email: user.email },
    ))
}

/// POST /api/v1/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    AppJson(input): AppJson<VerifyRequest>,
) -> AppResult<ApiResponse<()>> {
    let user = find_by_email_or_404(&state, &input.email).await?;
    if user.is_verified {
        return Err(AppError::BadRequest("Account is already verified".into()));
    }

    let token = VerificationTokenRepo::find_valid(
        &state.pool,
        user.id,
        &hash_verification_code(input.code.trim()),
        TOKEN_TYPE_VERIFICATION,
    )
    .await?
    .ok_or_else(|| AppError::BadRequest("Invalid or expired verification code".into()))?;

    let mut tx = state.pool.begin().await?;
    VerificationTokenRepo::mark_used(&mut *tx, token.id).await?;
    UserRepo::mark_verified(&mut *tx, user.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "Email verified");
    Ok(ApiResponse::message("Email verified successfully"))
}

/// POST /api/v1/auth/send-code
pub async fn send_code(
    State(state): State<AppState>,
    AppJson(input): AppJson<SendCodeRequest>,
) -> AppResult<ApiResponse<()>> {
    let user = find_by_email_or_404(&state, &input.email).await?;
    if user.is_verified {
        return Err(AppError::BadRequest("Account is already verified".into()));
    }

    let invalidated =
        VerificationTokenRepo::invalidate_outstanding(&state.pool, user.id, TOKEN_TYPE_VERIFICATION)
            .await?;
    tracing::debug!(user_id = user.id, invalidated, "Outstanding verification codes invalidated");

    issue_verification_code(&state, &user).await?;
    Ok(ApiResponse::message("A new verification code has been sent"))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let identifier = input.identifier.trim();
    if identifier.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "identifier and password are required".into(),
        ));
    }

    let user = if is_email_identifier(identifier) {
        UserRepo::find_by_email(&state.pool, &identifier.to_lowercase()).await?
    } else {
        UserRepo::find_by_username(&state.pool, identifier).await?
    }
    .ok_or_else(|| AppError::NotFound("Account not found".into()))?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(AppError::unauthorized("Invalid credentials"));
    }
    if !user.is_verified {
        return Err(AppError::forbidden(
            "Account is not verified. Check your email for the verification code",
        ));
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    let token = generate_access_token(user.id, &user.role, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            token,
            user: user.into(),
        },
    ))
}

/// GET /api/v1/auth/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;
    Ok(ApiResponse::ok("Profile retrieved", user.into()))
}
