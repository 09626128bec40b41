use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Wallet, WalletEntry};

/// Body of `POST /wallet/add` and `POST /wallet/withdraw`.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Smallest currency unit (paise).
    pub amount: i64,
    pub description: Option<String>,
}

/// Query string of `GET /wallet/transactions`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: i64,
    pub currency: String,
    pub is_active: bool,
}

impl From<Wallet> for BalanceResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            balance: wallet.balance,
            currency: wallet.currency,
            is_active: wallet.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionDto {
    pub id: Uuid,
    pub direction: String,
    pub amount: i64,
    pub description: String,
    pub status: String,
    pub reference: String,
    pub timestamp: DateTime<Utc>,
}

impl From<WalletEntry> for TransactionDto {
    fn from(entry: WalletEntry) -> Self {
        Self {
            id: entry.entry_id,
            direction: entry.direction,
            amount: entry.amount,
            description: entry.description,
            status: entry.status,
            reference: entry.reference,
            timestamp: entry.created_utc,
        }
    }
}

/// Response of a successful credit or debit.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub balance: i64,
    pub transaction: TransactionDto,
}

#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionDto>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_dto_carries_entry_fields() {
        let entry = WalletEntry {
            entry_id: Uuid::new_v4(),
            wallet_id: Uuid::new_v4(),
            direction: "credit".to_string(),
            amount: 500,
            description: "Funds added".to_string(),
            status: "completed".to_string(),
            reference: "CR-1714989954123-k3f9a0qz".to_string(),
            created_utc: Utc::now(),
        };
        let dto = TransactionDto::from(entry.clone());
        assert_eq!(dto.id, entry.entry_id);
        assert_eq!(dto.direction, "credit");
        assert_eq!(dto.amount, 500);
        assert_eq!(dto.reference, entry.reference);
    }
}
