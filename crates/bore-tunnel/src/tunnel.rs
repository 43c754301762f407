//! Tunnel handle and `bore` subprocess lifecycle.

use std::ffi::OsStr;
use std::process::Stdio;

use tokio::io::BufReader;
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::args::{ConnectOptions, build_args};
use crate::error::{Error, Result};
use crate::scan::scan_for_endpoint;

/// Conventional name of the client binary, resolved on `PATH`.
const BORE_PROGRAM: &str = "bore";

/// A live tunnel backed by a supervised `bore local` subprocess.
///
/// The handle exclusively owns the subprocess. Dropping the handle kills
/// the process on any exit path; [`close`](Self::close) is the explicit
/// variant that also waits for it to be reaped.
#[derive(Debug)]
pub struct BoreTunnel {
    remote_server: String,
    remote_port: u16,
    http_origin: String,
    child: Child,
    // Held for the handle's lifetime: dropping the read end of the pipe
    // would SIGPIPE the client on its next log line.
    _stdout: BufReader<ChildStdout>,
    closed: bool,
}

impl BoreTunnel {
    /// Create a tunnel exposing `local_port` on `remote_server`.
    ///
    /// Spawns `bore local`, then reads its stdout line by line until the
    /// endpoint announcement reveals the allocated remote port. Waiting
    /// for the announcement suspends the calling task only; there is no
    /// built-in timeout, so wrap the call in [`tokio::time::timeout`]
    /// when the client may hang.
    ///
    /// # Errors
    ///
    /// [`Error::Launch`] when the binary cannot be started, and
    /// [`Error::NoEndpoint`] when its stdout closes before any line
    /// announces `<remote_server>:<port>`. In the latter case the spawned
    /// process has already been terminated and reaped.
    pub async fn connect(
        local_port: u16,
        remote_server: &str,
        options: ConnectOptions,
    ) -> Result<Self> {
        Self::connect_with_program(BORE_PROGRAM, local_port, remote_server, options).await
    }

    /// Like [`connect`](Self::connect), with an explicit program name or
    /// path for a `bore` binary that is not on `PATH`.
    pub async fn connect_with_program(
        program: impl AsRef<OsStr>,
        local_port: u16,
        remote_server: &str,
        options: ConnectOptions,
    ) -> Result<Self> {
        let program = program.as_ref();
        let args = build_args(local_port, remote_server, &options);
        debug!(program = %program.to_string_lossy(), ?args, "launching tunnel client");

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::Launch {
                program: program.to_string_lossy().into_owned(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| Error::Launch {
            program: program.to_string_lossy().into_owned(),
            source: std::io::Error::other("failed to capture stdout"),
        })?;

        let mut output = BufReader::new(stdout);
        match scan_for_endpoint(&mut output, remote_server).await {
            Ok(remote_port) => {
                info!(remote_server, remote_port, local_port, "tunnel established");
                Ok(Self {
                    remote_server: remote_server.to_string(),
                    remote_port,
                    http_origin: format!("http://{remote_server}:{remote_port}"),
                    child,
                    _stdout: output,
                    closed: false,
                })
            }
            Err(error) => {
                // Release the process before surfacing the failure.
                terminate(&mut child).await;
                Err(error)
            }
        }
    }

    /// Remote tunnel server this handle was connected to.
    pub fn remote_server(&self) -> &str {
        &self.remote_server
    }

    /// Port allocated on the remote server, as announced by the client.
    pub const fn remote_port(&self) -> u16 {
        self.remote_port
    }

    /// The origin (scheme, host, port) where the local port is exposed.
    pub fn http_origin(&self) -> &str {
        &self.http_origin
    }

    /// OS process id of the client, or `None` once it has been reaped.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Close the tunnel, terminating the client process and waiting for
    /// it to exit. Idempotent: closing an already-closed tunnel, or one
    /// whose process died on its own, is a no-op.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        terminate(&mut self.child).await;
        // Flagged only once termination has completed, so a close future
        // dropped mid-wait leaves the next close able to finish the job.
        self.closed = true;
    }
}

/// Kill the client and wait until it is reaped. Tolerates a process that
/// already exited, so close never raises.
async fn terminate(child: &mut Child) {
    if let Err(error) = child.start_kill() {
        // Already exited and reaped; wait() below returns the cached status.
        debug!(%error, "tunnel client already gone");
    }
    match child.wait().await {
        Ok(status) => debug!(%status, "tunnel client terminated"),
        Err(error) => warn!(%error, "failed to reap tunnel client"),
    }
}
