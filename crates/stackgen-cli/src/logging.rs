//! Tracing initialization for the CLI

use tracing::Level;

/// Environment variable controlling the log level
pub const LOG_ENV_VAR: &str = "STACKGEN_LOG";

/// Resolve the level from `STACKGEN_LOG`; unknown or absent values
/// fall back to warnings only so generator output stays readable.
pub fn level_from_env() -> Level {
    match std::env::var(LOG_ENV_VAR)
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Initialize tracing for logging. Diagnostics go to stderr; stdout is
/// reserved for prompts and the generated-project summary.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_max_level(level_from_env())
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_warn() {
        std::env::remove_var(LOG_ENV_VAR);
        assert_eq!(level_from_env(), Level::WARN);
    }
}
