//! Domain errors for wallet operations.

use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Wallet feature is only available for Researchers and Innovators")]
    NotEligible,

    #[error("Wallet is inactive")]
    WalletInactive,

    #[error("Wallet not found")]
    WalletNotFound,

    #[error("Conflicting wallet update: {0}")]
    Conflict(String),

    // Balance/entry mismatch detected mid-operation. The transaction
    // is aborted; corrupted state is never persisted.
    #[error("Wallet integrity violation: {0}")]
    Integrity(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        let msg = anyhow::anyhow!("{err}");
        match err {
            WalletError::InvalidAmount | WalletError::InsufficientFunds => {
                AppError::BadRequest(msg)
            }
            WalletError::NotEligible | WalletError::WalletInactive => AppError::Forbidden(msg),
            WalletError::WalletNotFound => AppError::NotFound(msg),
            WalletError::Conflict(_) => AppError::Conflict(msg),
            WalletError::Integrity(_) => AppError::InternalError(msg),
            WalletError::Database(_) => AppError::DatabaseError(msg),
        }
    }
}
