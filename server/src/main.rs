use tokio::net::TcpListener;
use todo_server::{config, telemetry, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = config::load_dotenv(".env");

    let config = Config::from_env()?;
    telemetry::init_tracing(&config.log_filter);
    if let Err(err) = dotenv {
        tracing::warn!(error = %err, "ignoring unreadable .env file");
    }

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    tracing::info!("health check available at http://{addr}/health");

    todo_server::run_until(listener, shutdown_signal()).await?;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down gracefully");
}
