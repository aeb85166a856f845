// SPDX-License-Identifier: MIT
//
// Logger setup for the oklrch binary.
//
// The libraries only talk to the `log` facade. This installs env_logger
// behind it once, early in main: an explicit filter wins, then RUST_LOG,
// then warnings only so a normal run prints nothing but the ramp.

use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "debug",
/// "oklrch_ramp=trace").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto }
    }
}

impl LoggingConfig {
    /// Build the logger this config describes without installing it.
    fn builder(&self, rust_log: Option<&str>) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        match self.env_filter.as_deref().or(rust_log) {
            Some(filter) => builder.parse_filters(filter),
            None => builder.filter_level(LevelFilter::Warn),
        };
        builder.write_style(self.write_style);
        builder
    }
}

static INIT: Once = Once::new();

/// Install the global logger. Later calls are ignored.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        // Another logger may already be installed (tests); keep it.
        if config.builder(rust_log.as_deref()).try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn level(config: &LoggingConfig, rust_log: Option<&str>) -> LevelFilter {
        config.builder(rust_log).build().filter()
    }

    #[test]
    fn defaults_to_warnings() {
        assert_eq!(level(&LoggingConfig::default(), None), LevelFilter::Warn);
    }

    #[test]
    fn rust_log_is_used_without_a_filter() {
        assert_eq!(level(&LoggingConfig::default(), Some("debug")), LevelFilter::Debug);
    }

    #[test]
    fn explicit_filter_beats_rust_log() {
        let config = LoggingConfig { env_filter: Some("trace".into()), ..LoggingConfig::default() };
        assert_eq!(level(&config, Some("error")), LevelFilter::Trace);
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(&LoggingConfig::default());
        init_logging(&LoggingConfig::default());
    }
}
