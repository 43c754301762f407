//! Endpoint announcement scanning over the client's stdout.
//!
//! `bore local` prints human-readable lines; the only assumption made here
//! is that one of them, before stdout closes, contains
//! `<remote_server>:<port>` with the allocated port in decimal.

use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Compile the per-attempt announcement pattern. The server address is
/// escaped so metacharacters in it (dots, brackets) match literally.
fn endpoint_pattern(remote_server: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        "{}:([0-9]+)",
        regex::escape(remote_server)
    ))?)
}

/// Read lines from `output` until one announces `<remote_server>:<port>`,
/// returning the allocated port.
///
/// Lines are consumed lazily and in order; the first match wins and no
/// further lines are read after it. `lines()` strips the terminator,
/// tolerating both LF and CRLF. If the stream ends with no match the
/// attempt fails with [`Error::NoEndpoint`].
pub(crate) async fn scan_for_endpoint<R>(output: R, remote_server: &str) -> Result<u16>
where
    R: AsyncBufRead + Unpin,
{
    let pattern = endpoint_pattern(remote_server)?;
    let mut lines = output.lines();
    while let Some(line) = lines.next_line().await? {
        trace!(%line, "tunnel client output");
        if let Some(captures) = pattern.captures(&line) {
            // Digits beyond u16 range mean the output no longer matches
            // the assumed contract; treated the same as no announcement.
            let port = captures[1].parse::<u16>().map_err(|_| Error::NoEndpoint {
                remote_server: remote_server.to_string(),
            })?;
            debug!(remote_server, port, "endpoint announced");
            return Ok(port);
        }
    }
    debug!(remote_server, "stdout closed without an endpoint announcement");
    Err(Error::NoEndpoint {
        remote_server: remote_server.to_string(),
    })
}
