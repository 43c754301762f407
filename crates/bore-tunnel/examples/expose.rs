//! Expose a local port on a public bore server and print the origin.
//!
//! ```bash
//! cargo run --example expose -- 8000 bore.pub
//! ```

use anyhow::Context;
use bore_tunnel::{BoreTunnel, ConnectOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "bore_tunnel=debug".into()),
        ))
        .init();

    let mut args = std::env::args().skip(1);
    let local_port: u16 = args
        .next()
        .context("usage: expose <local-port> [remote-server]")?
        .parse()
        .context("local port must be a number")?;
    let remote_server = args.next().unwrap_or_else(|| "bore.pub".to_string());

    let mut tunnel =
        BoreTunnel::connect(local_port, &remote_server, ConnectOptions::default()).await?;
    println!("tunnel address: {}", tunnel.http_origin());

    tokio::signal::ctrl_c().await?;
    tunnel.close().await;
    Ok(())
}
