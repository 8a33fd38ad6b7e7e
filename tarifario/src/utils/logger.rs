//! Logging Infrastructure
//!
//! Console logging by default, daily rolling files when a log directory exists.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Filter from a `LOG_LEVEL` value: a bare level (`debug`) or full directives
/// (`tarifario=debug,warn`). Unparseable values fall back to `info`.
fn level_filter(log_level: Option<&str>) -> EnvFilter {
    let directives = log_level.unwrap_or("info");
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logger with optional file output
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(level_filter(log_level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "tarifario");
            let _ = subscriber.with_writer(file_appender).try_init();
            return;
        }
    }

    // stdout carries rendered quotes, so logs go to stderr
    let _ = subscriber.with_writer(std::io::stderr).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter(Some("debug")).to_string(), "debug");
        assert_eq!(level_filter(None).to_string(), "info");
        assert_eq!(level_filter(Some("tarifario=loud")).to_string(), "info");
    }
}
