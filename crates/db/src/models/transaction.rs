//! Payment transaction records.

use lisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `transactions`. `amount` is in minor currency units.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentTransaction {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: i64,
    pub status: String,
    pub provider: String,
    pub provider_order_id: Option<String>,
    pub payment_method: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreatePaymentTransaction {
    pub user_id: DbId,
    pub amount: i64,
    pub provider: String,
    pub payment_method: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePaymentTransaction {
    pub status: Option<String>,
    pub provider_order_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
}
