//! Payment transaction records.

use axum::extract::State;
use lisan_core::support::{validate_amount, validate_payment_status};
use lisan_core::types::DbId;
use lisan_core::validation::require_text;
use lisan_db::models::transaction::{
    CreatePaymentTransaction, PaymentTransaction, UpdatePaymentTransaction,
};
use lisan_db::repositories::TransactionRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: i64,
    pub provider: String,
    pub payment_method: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionListParams {
    pub status: Option<String>,
}

/// POST /api/v1/transactions
pub async fn create_transaction(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTransactionRequest>,
) -> AppResult<ApiResponse<PaymentTransaction>> {
    validate_amount(input.amount)?;
    let provider = require_text("provider", &input.provider)?.to_string();

    let transaction = TransactionRepo::create(
        &state.pool,
        &CreatePaymentTransaction {
            user_id: auth.user_id,
            amount: input.amount,
            provider,
            payment_method: input.payment_method,
            metadata: input.metadata,
        },
    )
    .await?;

    tracing::info!(
        transaction_id = transaction.id,
        user_id = auth.user_id,
        amount = transaction.amount,
        "Transaction created",
    );
    Ok(ApiResponse::created("Transaction created", transaction))
}

/// GET /api/v1/transactions
pub async fn list_transactions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<TransactionListParams>,
) -> AppResult<ApiResponse<Paginated<PaymentTransaction>>> {
    let page = page.to_request()?;
    if let Some(status) = params.status.as_deref() {
        validate_payment_status(status)?;
    }
    let status = params.status.as_deref();

    let rows = TransactionRepo::list(&state.pool, status, None, &page).await?;
    let total = TransactionRepo::count(&state.pool, status, None).await?;
    Ok(ApiResponse::ok(
        "Transactions retrieved",
        Paginated::new(rows, &page, total),
    ))
}

/// GET /api/v1/transactions/users/{user_id}
pub async fn user_transactions(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
    AppQuery(page): AppQuery<PageParams>,
) -> AppResult<ApiResponse<Paginated<PaymentTransaction>>> {
    auth.require_owner_or_admin(user_id)?;
    let page = page.to_request()?;

    let rows = TransactionRepo::list(&state.pool, None, Some(user_id), &page).await?;
    let total = TransactionRepo::count(&state.pool, None, Some(user_id)).await?;
    Ok(ApiResponse::ok(
        "Transactions retrieved",
        Paginated::new(rows, &page, total),
    ))
}

/// GET /api/v1/transactions/{id}
pub async fn get_transaction(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<PaymentTransaction>> {
    let transaction = TransactionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction", id))?;
    auth.require_owner_or_admin(transaction.user_id)?;
    Ok(ApiResponse::ok("Transaction retrieved", transaction))
}

/// PUT /api/v1/transactions/{id}
pub async fn update_transaction(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdatePaymentTransaction>,
) -> AppResult<ApiResponse<PaymentTransaction>> {
    if let Some(status) = input.status.as_deref() {
        validate_payment_status(status)?;
    }

    let transaction = TransactionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction", id))?;
    tracing::info!(
        transaction_id = id,
        admin_id = admin.user_id,
        status = %transaction.status,
        "Transaction updated",
    );
    Ok(ApiResponse::ok("Transaction updated", transaction))
}

/// DELETE /api/v1/transactions/{id}
pub async fn delete_transaction(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !TransactionRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Transaction", id));
    }
    tracing::info!(transaction_id = id, admin_id = admin.user_id, "Transaction deleted");
    Ok(ApiResponse::message("Transaction deleted"))
}
