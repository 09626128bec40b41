//! Wallet account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user wallet: one balance plus an append-only entry log.
///
/// Owned 1:1 by a user; `balance` is kept in the smallest currency
/// unit (paise) and never goes negative. `currency` is fixed at
/// creation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Wallet {
    pub wallet_id: Uuid,
    pub user_id: Uuid,
    pub balance: i64,
    pub is_active: bool,
    pub currency: String,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}
