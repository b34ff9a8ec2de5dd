//! The Taverna: a ready-to-play Mudforge world.
//!
//! ```text
//! cargo run -p taverna
//! telnet localhost 1234
//! ```
//!
//! `MUDFORGE_BIND` overrides the listen address; `RUST_LOG` the log level.

use mudforge::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = std::env::var("MUDFORGE_BIND")
        .unwrap_or_else(|_| MudServerBuilder::DEFAULT_BIND.to_string());

    let server = MudServer::builder().bind(&addr).build().await?;
    tracing::info!(addr = %server.local_addr(), "la taverna è aperta");

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await;
    tracing::info!("la taverna chiude");
    Ok(())
}
