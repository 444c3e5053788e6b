//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and
//! production environments.

use std::path::Path;

use crate::core::Config;

/// Initialize the tracing subscriber.
///
/// Log level comes from `RUST_LOG` when set, otherwise from the config.
/// When `log_dir` points at an existing directory, output goes to a daily
/// rolling file instead of stderr.
pub fn init(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "guestlist_server={},tower_http=info",
            config.log_level
        ))
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = &config.log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "guestlist-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
