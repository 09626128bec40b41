//! Postgres-backed wallet store.
//!
//! All balance mutations for one wallet are serialized through a row
//! lock (`SELECT ... FOR UPDATE`) inside a single transaction, so the
//! insufficient-funds check is never evaluated against a stale
//! balance and the entry insert commits atomically with the balance
//! update. Different wallets never contend.

use crate::error::WalletError;
use crate::models::{Direction, EntryStatus, Wallet, WalletEntry};
use crate::services::metrics::{DB_QUERY_DURATION, ERRORS_TOTAL, WALLETS_PROVISIONED, WALLET_TRANSACTIONS_TOTAL};
use crate::services::reference::generate_reference;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

const WALLET_COLUMNS: &str =
    "wallet_id, user_id, balance, is_active, currency, created_utc, updated_utc";
const ENTRY_COLUMNS: &str =
    "entry_id, wallet_id, direction, amount, description, status, reference, created_utc";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "wallet-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, WalletError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), WalletError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), WalletError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Wallet lifecycle
    // -------------------------------------------------------------------------

    /// Look up the wallet owned by a user.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_wallet(&self, user_id: Uuid) -> Result<Option<Wallet>, WalletError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_wallet"])
            .start_timer();

        let wallet = sqlx::query_as::<_, Wallet>(&format!(
            "SELECT {WALLET_COLUMNS} FROM wallets WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();

        Ok(wallet)
    }

    /// Provision-on-first-need: returns the user's wallet, creating it
    /// with a zero balance when none exists yet. Callers must have
    /// passed the access policy; ineligible users never reach this.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_or_create_wallet(
        &self,
        user_id: Uuid,
        currency: &str,
    ) -> Result<Wallet, WalletError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_or_create_wallet"])
            .start_timer();

        let created = sqlx::query_as::<_, Wallet>(&format!(
            r#"
            INSERT INTO wallets (wallet_id, user_id, currency)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING {WALLET_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(currency)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();

        if let Some(wallet) = created {
            WALLETS_PROVISIONED
                .with_label_values(&[currency])
                .inc();
            info!(
                wallet_id = %wallet.wallet_id,
                currency = %wallet.currency,
                "Wallet provisioned"
            );
            return Ok(wallet);
        }

        // Lost the insert race or the wallet already existed.
        self.get_wallet(user_id)
            .await?
            .ok_or(WalletError::WalletNotFound)
    }

    /// Flip the wallet's active flag. Not logged as a ledger entry.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn toggle_status(&self, user_id: Uuid) -> Result<Wallet, WalletError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["toggle_status"])
            .start_timer();

        let wallet = sqlx::query_as::<_, Wallet>(&format!(
            r#"
            UPDATE wallets
            SET is_active = NOT is_active, updated_utc = now()
            WHERE user_id = $1
            RETURNING {WALLET_COLUMNS}
            "#
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(WalletError::WalletNotFound)?;

        timer.observe_duration();

        info!(
            wallet_id = %wallet.wallet_id,
            is_active = wallet.is_active,
            "Wallet status toggled"
        );

        Ok(wallet)
    }

    // -------------------------------------------------------------------------
    // Ledger mutations
    // -------------------------------------------------------------------------

    /// Atomically increase the balance and append a completed credit entry.
    pub async fn credit(
        &self,
        user_id: Uuid,
        amount: i64,
        description: &str,
    ) -> Result<(Wallet, WalletEntry), WalletError> {
        self.apply_transaction(user_id, Direction::Credit, amount, description)
            .await
    }

    /// Atomically decrease the balance and append a completed debit entry.
    /// Fails with `InsufficientFunds` when the locked balance is too low;
    /// a rejected debit leaves balance and entries untouched.
    pub async fn debit(
        &self,
        user_id: Uuid,
        amount: i64,
        description: &str,
    ) -> Result<(Wallet, WalletEntry), WalletError> {
        self.apply_transaction(user_id, Direction::Debit, amount, description)
            .await
    }

    #[instrument(skip(self, description), fields(user_id = %user_id, direction = %direction, amount = amount))]
    async fn apply_transaction(
        &self,
        user_id: Uuid,
        direction: Direction,
        amount: i64,
        description: &str,
    ) -> Result<(Wallet, WalletEntry), WalletError> {
        if amount <= 0 {
            ERRORS_TOTAL.with_label_values(&["invalid_amount"]).inc();
            return Err(WalletError::InvalidAmount);
        }

        let timer = DB_QUERY_DURATION
            .with_label_values(&["apply_transaction"])
            .start_timer();

        let mut tx = self.pool.begin().await?;

        // Row lock: linearizes all mutations of this wallet. Dropping
        // the transaction on any early return rolls everything back.
        let wallet = sqlx::query_as::<_, Wallet>(&format!(
            "SELECT {WALLET_COLUMNS} FROM wallets WHERE user_id = $1 FOR UPDATE"
        ))
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(WalletError::WalletNotFound)?;

        if !wallet.is_active {
            ERRORS_TOTAL.with_label_values(&["wallet_inactive"]).inc();
            return Err(WalletError::WalletInactive);
        }

        let expected_balance = match direction {
            Direction::Credit => wallet
                .balance
                .checked_add(amount)
                .ok_or_else(|| WalletError::Integrity("balance overflow".to_string()))?,
            Direction::Debit => {
                if amount > wallet.balance {
                    ERRORS_TOTAL
                        .with_label_values(&["insufficient_funds"])
                        .inc();
                    return Err(WalletError::InsufficientFunds);
                }
                wallet.balance - amount
            }
        };

        let updated = sqlx::query_as::<_, Wallet>(&format!(
            r#"
            UPDATE wallets
            SET balance = $1, updated_utc = now()
            WHERE wallet_id = $2
            RETURNING {WALLET_COLUMNS}
            "#
        ))
        .bind(expected_balance)
        .bind(wallet.wallet_id)
        .fetch_one(&mut *tx)
        .await?;

        if updated.balance != expected_balance || updated.balance < 0 {
            // Fatal: abort rather than persist a corrupted balance.
            tx.rollback().await.ok();
            ERRORS_TOTAL.with_label_values(&["integrity"]).inc();
            return Err(WalletError::Integrity(format!(
                "balance mismatch after {direction}: expected {expected_balance}, got {}",
                updated.balance
            )));
        }

        let reference = generate_reference(direction);
        let entry = sqlx::query_as::<_, WalletEntry>(&format!(
            r#"
            INSERT INTO wallet_entries (entry_id, wallet_id, direction, amount, description, status, reference)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(wallet.wallet_id)
        .bind(direction.as_str())
        .bind(amount)
        .bind(description)
        .bind(EntryStatus::Completed.as_str())
        .bind(&reference)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                WalletError::Conflict(format!("reference '{}' already exists", reference))
            }
            e => WalletError::Database(e),
        })?;

        tx.commit().await?;

        timer.observe_duration();
        WALLET_TRANSACTIONS_TOTAL
            .with_label_values(&[direction.as_str(), "ok"])
            .inc();

        info!(
            wallet_id = %updated.wallet_id,
            balance = updated.balance,
            reference = %entry.reference,
            "Ledger entry appended"
        );

        Ok((updated, entry))
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// List entries in chronological (insertion) order.
    #[instrument(skip(self), fields(wallet_id = %wallet_id))]
    pub async fn list_entries(
        &self,
        wallet_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<WalletEntry>, WalletError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_entries"])
            .start_timer();

        let entries = sqlx::query_as::<_, WalletEntry>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM wallet_entries
            WHERE wallet_id = $1
            ORDER BY seq ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(wallet_id)
        .bind(limit)
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;

        timer.observe_duration();

        Ok(entries)
    }
}
