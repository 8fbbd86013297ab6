use roomledger::api::handlers::app_router;
use roomledger::config::CONFIG;
use roomledger::{InMemoryLogging, SettlementOptimizer, SettlementService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&CONFIG.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let optimizer = SettlementOptimizer::new(CONFIG.optimizer_config());
    let service = Arc::new(SettlementService::new(optimizer, InMemoryLogging::new()));
    let app = app_router(service, CONFIG.request_timeout());

    let addr = CONFIG.socket_addr()?;
    info!("Server running at http://{}", addr);
    info!("Strict balance check: {}", CONFIG.strict_balance_check);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
