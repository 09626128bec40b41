//! Application startup and lifecycle management.

use axum::middleware::from_fn;
use axum::routing::{get, patch, post};
use axum::Router;
use service_core::error::AppError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::WalletConfig;
use crate::handlers;
use crate::middleware::auth::require_wallet_role;
use crate::models::AccessPolicy;
use crate::services::{init_metrics, Database};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: WalletConfig,
    pub policy: AccessPolicy,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: WalletConfig) -> Result<Self, AppError> {
        init_metrics();

        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;

        db.run_migrations().await?;

        let policy = AccessPolicy::new(config.wallet.eligible_roles.iter().copied());

        let state = AppState {
            db,
            config: config.clone(),
            policy,
        };

        let router = Router::new()
            .route("/wallet/balance", get(handlers::wallet::get_balance))
            .route("/wallet/add", post(handlers::wallet::add_funds))
            .route("/wallet/withdraw", post(handlers::wallet::withdraw_funds))
            .route(
                "/wallet/transactions",
                get(handlers::wallet::get_transaction_history),
            )
            .route(
                "/wallet/toggle-status",
                patch(handlers::wallet::toggle_status),
            )
            // Coarse role filter on the wallet routes only; handlers
            // still apply the stricter service-level policy.
            .route_layer(from_fn(require_wallet_role))
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        user_id = tracing::field::Empty,
                        role = tracing::field::Empty,
                    )
                }),
            )
            .with_state(state);

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Wallet service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
