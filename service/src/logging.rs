use crate::config::Config;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// HTTP stack crates whose logs are hidden unless running at Trace.
const FILTERED_MODULES: &[&str] = &[
    "tower",
    "tower_sessions",
    "hyper",
    "hyper_util",
    "axum",
    "reqwest",
    "rustls",
];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger at the level configured in `config`.
    ///
    /// At Trace every log line is shown, including those from the HTTP stack. At
    /// any other level the modules in `FILTERED_MODULES` are silenced.
    pub fn init_logger(config: &Config) {
        let level = config.log_level_filter;
        let log_config = Self::build_log_config(Self::should_filter_dependencies(level));

        TermLogger::init(level, log_config, TerminalMode::Mixed, ColorChoice::Auto)
            .expect("Failed to start simplelog");
    }

    fn should_filter_dependencies(level: LevelFilter) -> bool {
        level != LevelFilter::Trace
    }

    fn build_log_config(apply_filters: bool) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if apply_filters {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtered_modules_contains_http_stack() {
        for module in ["tower", "hyper", "axum", "reqwest"] {
            assert!(
                FILTERED_MODULES.contains(&module),
                "{module} should be filtered"
            );
        }
    }

    #[test]
    fn test_trace_level_shows_dependency_logs() {
        assert!(!Logger::should_filter_dependencies(LevelFilter::Trace));
    }

    #[test]
    fn test_other_levels_hide_dependency_logs() {
        for level in [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
        ] {
            assert!(
                Logger::should_filter_dependencies(level),
                "{level} should enable filtering"
            );
        }
    }

    #[test]
    fn test_build_log_config_does_not_panic() {
        let _filtered = Logger::build_log_config(true);
        let _unfiltered = Logger::build_log_config(false);
    }
}
