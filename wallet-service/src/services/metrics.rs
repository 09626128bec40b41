//! Prometheus metrics for wallet-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Ledger mutation counter (no high-cardinality labels).
pub static WALLET_TRANSACTIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "wallet_transactions_total",
        "Total number of wallet credits/debits applied",
        &["direction", "status"] // direction: credit|debit, status: ok|error - not user_id to avoid cardinality explosion
    )
    .expect("Failed to register wallet_transactions_total")
});

/// Lazily provisioned wallet counter.
pub static WALLETS_PROVISIONED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "wallet_accounts_provisioned_total",
        "Total number of wallet accounts provisioned",
        &["currency"]
    )
    .expect("Failed to register wallet_accounts_provisioned_total")
});

/// Error counter for alerting.
pub static ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "wallet_errors_total",
        "Total number of errors by type",
        &["error_type"] // insufficient_funds, forbidden, db_error, etc.
    )
    .expect("Failed to register wallet_errors_total")
});

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "wallet_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register wallet_db_query_duration")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&WALLET_TRANSACTIONS_TOTAL);
    Lazy::force(&WALLETS_PROVISIONED);
    Lazy::force(&ERRORS_TOTAL);
    Lazy::force(&DB_QUERY_DURATION);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
