//! Command-line construction for the `bore local` invocation.

/// Options for a tunnel connection attempt.
///
/// Every field is independently optional; an unset field omits the
/// corresponding flag so the `bore` client / server picks its default.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Local host to expose (`--local-host`).
    pub local_host: Option<String>,
    /// Requested port on the remote server (`--port`). The server may
    /// still assign a different one; the announced port is authoritative.
    pub remote_port: Option<u16>,
    /// Secret for authentication (`--secret`).
    pub secret: Option<String>,
}

/// Build the argv for `bore local`, flags first, then the `--to` server
/// and the local port as the trailing positional token.
pub(crate) fn build_args(
    local_port: u16,
    remote_server: &str,
    options: &ConnectOptions,
) -> Vec<String> {
    let mut args = vec!["local".to_string()];
    if let Some(ref local_host) = options.local_host {
        args.push("--local-host".to_string());
        args.push(local_host.clone());
    }
    if let Some(remote_port) = options.remote_port {
        args.push("--port".to_string());
        args.push(remote_port.to_string());
    }
    if let Some(ref secret) = options.secret {
        args.push("--secret".to_string());
        args.push(secret.clone());
    }
    args.push("--to".to_string());
    args.push(remote_server.to_string());
    args.push(local_port.to_string());
    args
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_minimal_argv() {
        let args = build_args(3000, "bore.pub", &ConnectOptions::default());
        assert_eq!(args, ["local", "--to", "bore.pub", "3000"]);
    }

    #[test]
    fn all_options_in_fixed_flag_order() {
        let options = ConnectOptions {
            local_host: Some("127.0.0.1".into()),
            remote_port: Some(8080),
            secret: Some("hunter2".into()),
        };
        let args = build_args(3000, "bore.pub", &options);
        assert_eq!(
            args,
            [
                "local",
                "--local-host",
                "127.0.0.1",
                "--port",
                "8080",
                "--secret",
                "hunter2",
                "--to",
                "bore.pub",
                "3000",
            ]
        );
    }

    /// Exhaustive check over all option subsets: exactly the unset flags
    /// are omitted and the fixed tokens never move.
    #[test]
    fn every_option_subset_omits_exactly_the_unset_flags() {
        for mask in 0u8..8 {
            let options = ConnectOptions {
                local_host: (mask & 1 != 0).then(|| "0.0.0.0".to_string()),
                remote_port: (mask & 2 != 0).then_some(4000),
                secret: (mask & 4 != 0).then(|| "s3cret".to_string()),
            };
            let args = build_args(2857, "remote.example", &options);

            assert_eq!(args.first().map(String::as_str), Some("local"));
            let tail = &args[args.len() - 3..];
            assert_eq!(tail, ["--to", "remote.example", "2857"]);

            assert_eq!(
                args.contains(&"--local-host".to_string()),
                options.local_host.is_some()
            );
            assert_eq!(
                args.contains(&"--port".to_string()),
                options.remote_port.is_some()
            );
            assert_eq!(
                args.contains(&"--secret".to_string()),
                options.secret.is_some()
            );

            // Each present flag appears exactly once, directly before its value.
            for (flag, value) in [
                ("--local-host", options.local_host.clone()),
                ("--port", options.remote_port.map(|p| p.to_string())),
                ("--secret", options.secret.clone()),
            ] {
                if let Some(value) = value {
                    let positions: Vec<_> = args
                        .iter()
                        .enumerate()
                        .filter(|(_, a)| a.as_str() == flag)
                        .map(|(i, _)| i)
                        .collect();
                    assert_eq!(positions.len(), 1, "duplicate {flag}");
                    assert_eq!(args[positions[0] + 1], value);
                }
            }
        }
    }
}
