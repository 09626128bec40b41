use wallet_service::config::WalletConfig;
use wallet_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WalletConfig::from_env().expect("Failed to load configuration");

    service_core::observability::init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
