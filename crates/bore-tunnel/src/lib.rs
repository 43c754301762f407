//! Async wrapper around the [`bore`](https://github.com/ekzhang/bore) CLI.
//!
//! Spawns `bore local` as a supervised subprocess, watches its stdout for
//! the line announcing the allocated remote port, and hands back a
//! [`BoreTunnel`] that owns the process and exposes the public origin:
//!
//! ```no_run
//! use bore_tunnel::{BoreTunnel, ConnectOptions};
//!
//! # async fn example() -> bore_tunnel::Result<()> {
//! let mut tunnel = BoreTunnel::connect(3000, "bore.pub", ConnectOptions::default()).await?;
//! tracing::info!("exposed at {}", tunnel.http_origin());
//! // ... serve traffic ...
//! tunnel.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! The tunnel protocol itself is `bore`'s business; this crate only
//! builds the command line, supervises the process, and guarantees it is
//! terminated when the handle is closed or dropped.

pub mod args;
pub mod error;
mod scan;
pub mod tunnel;

pub use args::ConnectOptions;
pub use error::{Error, Result};
pub use tunnel::BoreTunnel;
