use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const LOG_ENV: &str = "POCKETPLAN_LOG";

/// Install the global subscriber, appending to `log_path` so output never lands on the TUI.
/// `POCKETPLAN_LOG` takes precedence over `default_filter`.
pub(crate) fn init(default_filter: &str, log_path: &Path) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("pocketplan=info"));

        let file = match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Logging disabled: cannot open {}: {e}", log_path.display());
                return;
            }
        };

        let installed = fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
        if installed.is_ok() {
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "pocketplan started");
        }
    });
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    #[test]
    fn test_init_writes_to_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        super::init("pocketplan=info", &path);
        super::init("pocketplan=debug", &path);
        assert!(path.exists());
    }
}
