/// Runtime configuration of the operator tool
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./tarifario-data | Directory holding the key-value files |
/// | LOG_LEVEL | info | tracing max level |
/// | LOG_DIR | (unset) | Daily rolling log directory, stdout when unset |
/// | QUOTE_HISTORY_LIMIT | 50 | Quick quotes kept in the history |
/// | QUOTE_VALIDITY_DAYS | 7 | Days an official quote stays valid |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/hotel LOG_LEVEL=debug tarifario table high
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory, holds the stored documents
    pub work_dir: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub quote_history_limit: usize,
    pub quote_validity_days: i64,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./tarifario-data".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            quote_history_limit: std::env::var("QUOTE_HISTORY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            quote_validity_days: std::env::var("QUOTE_VALIDITY_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
        }
    }

    /// Override the working directory, keeping the rest
    ///
    /// Mostly used by tests
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
