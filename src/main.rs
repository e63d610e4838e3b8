#![recursion_limit = "256"]

mod cli;
mod application;
mod domain;
mod data;
mod ml;
mod infra;

use anyhow::Result;
use cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "netdetect=info";

/// RUST_LOG wins when it is set and parses; otherwise `netdetect=info`.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();
    cli.run()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Emit one debug and one info line under `filter` and return the output.
    fn emitted(filter: EnvFilter) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "netdetect::application", "Parameters default.model:   s_batch: 128; ");
            tracing::info!(target: "netdetect::application", "default.model: training complete.");
        });

        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_debug_level_from_rust_log_shows_parameters() {
        let out = emitted(log_filter(Some("netdetect=debug")));
        assert!(out.contains("Parameters default.model:"));
        assert!(out.contains("training complete."));
    }

    #[test]
    fn test_default_filter_is_info() {
        let out = emitted(log_filter(None));
        assert!(!out.contains("Parameters"));
        assert!(out.contains("training complete."));
    }

    #[test]
    fn test_unparsable_rust_log_falls_back_to_default() {
        assert_eq!(log_filter(Some("netdetect=loud")).to_string(), DEFAULT_LOG_FILTER);
    }
}
