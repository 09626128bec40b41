//! Common test utilities for wallet-service integration tests.
//!
//! Integration tests need a Postgres instance; they read
//! `TEST_DATABASE_URL` and skip (returning `None` from `spawn_app`)
//! when it is unset so the unit suite stays green without one.

use serde_json::json;
use service_core::config::Config as CommonConfig;
use std::sync::Once;
use uuid::Uuid;
use wallet_service::config::{DatabaseConfig, WalletConfig, WalletSettings};
use wallet_service::models::UserRole;
use wallet_service::startup::Application;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,wallet_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

/// Spawn a test application bound to a random port.
pub async fn spawn_app() -> Option<TestApp> {
    init_tracing();

    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping integration test");
            return None;
        }
    };

    let config = WalletConfig {
        common: CommonConfig { port: 0 },
        service_name: "wallet-service-test".to_string(),
        service_version: "test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            url: database_url,
            max_connections: 16,
            min_connections: 1,
        },
        wallet: WalletSettings {
            currency: "INR".to_string(),
            eligible_roles: vec![UserRole::Researcher, UserRole::Innovator],
        },
    };

    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", app.port());

    // Start the application in the background
    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    Some(TestApp {
        address,
        client: reqwest::Client::new(),
    })
}

impl TestApp {
    pub async fn get_balance(&self, user_id: Uuid, role: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/wallet/balance", self.address))
            .header("X-User-ID", user_id.to_string())
            .header("X-User-Role", role)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn post_funds(
        &self,
        path: &str,
        user_id: Uuid,
        role: &str,
        amount: i64,
        description: Option<&str>,
    ) -> reqwest::Response {
        let mut body = json!({ "amount": amount });
        if let Some(description) = description {
            body["description"] = json!(description);
        }

        self.client
            .post(format!("{}/wallet/{}", self.address, path))
            .header("X-User-ID", user_id.to_string())
            .header("X-User-Role", role)
            .json(&body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn add(&self, user_id: Uuid, amount: i64) -> reqwest::Response {
        self.post_funds("add", user_id, "Researcher", amount, None).await
    }

    pub async fn withdraw(&self, user_id: Uuid, amount: i64) -> reqwest::Response {
        self.post_funds("withdraw", user_id, "Researcher", amount, None)
            .await
    }

    pub async fn get_transactions(&self, user_id: Uuid, role: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/wallet/transactions", self.address))
            .header("X-User-ID", user_id.to_string())
            .header("X-User-Role", role)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn toggle_status(&self, user_id: Uuid, role: &str) -> reqwest::Response {
        self.client
            .patch(format!("{}/wallet/toggle-status", self.address))
            .header("X-User-ID", user_id.to_string())
            .header("X-User-Role", role)
            .send()
            .await
            .expect("request failed")
    }
}

/// Extract `data` from the `{success, data, message}` envelope,
/// asserting success.
pub async fn data_of(response: reqwest::Response) -> serde_json::Value {
    let body: serde_json::Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["success"], true, "expected success envelope: {body}");
    body["data"].clone()
}
