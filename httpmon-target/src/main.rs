use clap::Parser;
use std::net::SocketAddr;
use httpmon_target::config::DEFAULT_LISTEN_ADDR;
use httpmon_target::{TargetConfig, TargetServer};

#[derive(Parser, Debug)]
#[command(name = "httpmon-target", about = "Load target for httpmon")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();

    // Log "Listening on <addr>" once the server signals it is bound.
    tokio::spawn(async move {
        if let Ok(addr) = ready_rx.await {
            tracing::info!("Listening on {}", addr);
        }
    });

    TargetServer::new(TargetConfig { address: args.listen }).run(ready_tx).await?;
    Ok(())
}
