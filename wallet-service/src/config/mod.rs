use crate::models::UserRole;
use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use service_core::config::Config as CommonConfig;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct WalletConfig {
    pub common: CommonConfig,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub wallet: WalletSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Wallet-specific settings. Explicit configuration instead of a
/// shared global: currency is fixed per deployment, and the eligible
/// role set feeds the service-level access policy.
#[derive(Debug, Deserialize, Clone)]
pub struct WalletSettings {
    pub currency: String,
    pub eligible_roles: Vec<UserRole>,
}

impl WalletConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let port = env::var("WALLET_SERVICE_PORT")
            .unwrap_or_else(|_| "3006".to_string())
            .parse()?;

        let db_url = env::var("WALLET_DATABASE_URL").expect("WALLET_DATABASE_URL must be set");
        let max_connections = env::var("WALLET_DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()?;
        let min_connections = env::var("WALLET_DATABASE_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()?;

        let currency = env::var("WALLET_CURRENCY").unwrap_or_else(|_| "INR".to_string());
        let eligible_roles = env::var("WALLET_ELIGIBLE_ROLES")
            .map(|raw| {
                raw.split(',')
                    .filter_map(|label| UserRole::parse(label.trim()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|_| vec![UserRole::Researcher, UserRole::Innovator]);

        Ok(Self {
            common: CommonConfig { port },
            service_name: "wallet-service".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: env::var("WALLET_LOG_LEVEL")
                .unwrap_or_else(|_| "info,wallet_service=debug".to_string()),
            otlp_endpoint: env::var("WALLET_OTLP_ENDPOINT").ok(),
            database: DatabaseConfig {
                url: db_url,
                max_connections,
                min_connections,
            },
            wallet: WalletSettings {
                currency,
                eligible_roles,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligible_roles_parse_from_csv() {
        let roles: Vec<UserRole> = "Researcher, Innovator,Funding Agency"
            .split(',')
            .filter_map(|label| UserRole::parse(label.trim()))
            .collect();
        assert_eq!(
            roles,
            vec![
                UserRole::Researcher,
                UserRole::Innovator,
                UserRole::FundingAgency
            ]
        );
    }
}
