//! Error types for tunnel connection attempts.

use thiserror::Error;

/// Result type alias using the tunnel [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a connection attempt can surface.
///
/// Every variant is terminal for that attempt; retrying means calling
/// connect again, which starts an entirely new `bore` process.
#[derive(Debug, Error)]
pub enum Error {
    /// The external tunnel client could not be started at all (binary
    /// missing from `PATH`, permission denied, or another OS error).
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        /// Program name or path that was invoked.
        program: String,
        source: std::io::Error,
    },

    /// The client closed its stdout before any line announced the
    /// allocated remote port. Also covers an announcement whose captured
    /// digits do not fit a port number, since that means the client's
    /// output no longer matches the assumed contract.
    #[error("tunnel client never announced an endpoint for {remote_server}")]
    NoEndpoint {
        /// Remote server whose announcement line was expected.
        remote_server: String,
    },

    /// I/O error while reading the client's stdout stream.
    #[error("I/O error reading tunnel client output: {0}")]
    Io(#[from] std::io::Error),

    /// Endpoint pattern failed to compile. Unreachable for escaped server
    /// strings, but surfaced rather than panicking.
    #[error("invalid endpoint pattern: {0}")]
    Pattern(#[from] regex::Error),
}
