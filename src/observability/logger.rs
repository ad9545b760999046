//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the default directive for the
//! target applies. Logs go to stderr so client command output on stdout
//! stays clean.

use tracing_subscriber::EnvFilter;

/// What the process is about to do, which picks the default log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Running the API server
    Server,
    /// Running a one-shot client command
    Client,
}

impl LogTarget {
    /// Default filter directive
    pub fn default_directive(&self) -> &'static str {
        match self {
            LogTarget::Server => "info",
            LogTarget::Client => "warn",
        }
    }
}

/// Install the global fmt subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(target: LogTarget) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(target.default_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(LogTarget::Server.default_directive(), "info");
        assert_eq!(LogTarget::Client.default_directive(), "warn");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(LogTarget::Client);
        init_tracing(LogTarget::Server);
    }
}
