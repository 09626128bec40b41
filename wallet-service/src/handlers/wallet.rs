//! Wallet operation handlers.
//!
//! Every handler re-validates the caller against the service-level
//! access policy even though the route filter already ran: the policy
//! here is the final authority. Eligible callers get their wallet
//! provisioned lazily on first use.

use axum::extract::{Query, State};
use axum::Json;
use service_core::error::AppError;
use service_core::response::ApiResponse;

use crate::dtos::{
    AmountRequest, BalanceResponse, HistoryQuery, MutationResponse, StatusResponse,
    TransactionDto, TransactionListResponse,
};
use crate::error::WalletError;
use crate::middleware::AuthContext;
use crate::models::Wallet;
use crate::AppState;

/// Resolve the caller's wallet: policy check first, then lazy
/// provisioning. Ineligible callers never provision a wallet, and an
/// existing wallet row grants them nothing.
async fn resolve_wallet(state: &AppState, auth: &AuthContext) -> Result<Wallet, WalletError> {
    if !state.policy.can_access_wallet(auth.role) {
        return Err(WalletError::NotEligible);
    }
    state
        .db
        .get_or_create_wallet(auth.user_id, &state.config.wallet.currency)
        .await
}

/// `GET /wallet/balance`
pub async fn get_balance(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<ApiResponse<BalanceResponse>, AppError> {
    let wallet = resolve_wallet(&state, &auth).await?;
    if !wallet.is_active {
        return Err(WalletError::WalletInactive.into());
    }

    Ok(ApiResponse::ok(
        BalanceResponse::from(wallet),
        "Wallet details fetched successfully",
    ))
}

/// `POST /wallet/add`
pub async fn add_funds(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(payload): Json<AmountRequest>,
) -> Result<ApiResponse<MutationResponse>, AppError> {
    resolve_wallet(&state, &auth).await?;
    if payload.amount <= 0 {
        return Err(WalletError::InvalidAmount.into());
    }

    let description = payload
        .description
        .unwrap_or_else(|| "Funds added".to_string());

    let (wallet, entry) = state
        .db
        .credit(auth.user_id, payload.amount, &description)
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        amount = payload.amount,
        balance = wallet.balance,
        "Funds added"
    );

    Ok(ApiResponse::ok(
        MutationResponse {
            balance: wallet.balance,
            transaction: TransactionDto::from(entry),
        },
        "Funds added successfully",
    ))
}

/// `POST /wallet/withdraw`
pub async fn withdraw_funds(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(payload): Json<AmountRequest>,
) -> Result<ApiResponse<MutationResponse>, AppError> {
    resolve_wallet(&state, &auth).await?;
    if payload.amount <= 0 {
        return Err(WalletError::InvalidAmount.into());
    }

    let description = payload
        .description
        .unwrap_or_else(|| "Funds withdrawn".to_string());

    // The insufficient-funds check runs inside the store against the
    // row-locked balance, never against a stale read.
    let (wallet, entry) = state
        .db
        .debit(auth.user_id, payload.amount, &description)
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        amount = payload.amount,
        balance = wallet.balance,
        "Funds withdrawn"
    );

    Ok(ApiResponse::ok(
        MutationResponse {
            balance: wallet.balance,
            transaction: TransactionDto::from(entry),
        },
        "Funds withdrawn successfully",
    ))
}

/// `GET /wallet/transactions`
pub async fn get_transaction_history(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<HistoryQuery>,
) -> Result<ApiResponse<TransactionListResponse>, AppError> {
    let wallet = resolve_wallet(&state, &auth).await?;
    if !wallet.is_active {
        return Err(WalletError::WalletInactive.into());
    }

    let entries = state
        .db
        .list_entries(wallet.wallet_id, query.limit, query.offset)
        .await?;

    Ok(ApiResponse::ok(
        TransactionListResponse {
            transactions: entries.into_iter().map(TransactionDto::from).collect(),
        },
        "Transaction history fetched successfully",
    ))
}

/// `PATCH /wallet/toggle-status`
///
/// Allowed on inactive wallets: this is the reactivation path. Not
/// recorded as a ledger entry.
pub async fn toggle_status(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<ApiResponse<StatusResponse>, AppError> {
    resolve_wallet(&state, &auth).await?;

    let wallet = state.db.toggle_status(auth.user_id).await?;

    tracing::info!(
        user_id = %auth.user_id,
        is_active = wallet.is_active,
        "Wallet status toggled"
    );

    Ok(ApiResponse::ok(
        StatusResponse {
            is_active: wallet.is_active,
        },
        "Wallet status updated successfully",
    ))
}
