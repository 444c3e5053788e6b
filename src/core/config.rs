//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP listen port |
//! | DATABASE_PATH | guestlist.db | SQLite database file |
//! | LOG_LEVEL | info | Default log level (RUST_LOG wins when set) |
//! | LOG_DIR | (unset) | Daily rolling log file directory |
//! | ENVIRONMENT | development | development \| staging \| production |

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API listen port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Default log level when RUST_LOG is not set
    pub log_level: String,
    /// Log file directory; stderr when unset
    pub log_dir: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "guestlist.db".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override database path and port, commonly used in tests.
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
