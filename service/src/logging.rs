use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Modules to filter out from logging when not in Trace mode.
/// The inbound server and the outbound client both log every connection at Debug.
const FILTERED_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2", "tower", "axum"];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger at the configured level.
    ///
    /// Dependency logs are only shown at Trace.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let level = config.log_level_filter;
        let log_config = Self::build_log_config(Self::should_filter_dependencies(level));

        TermLogger::init(level, log_config, TerminalMode::Mixed, ColorChoice::Auto)
    }

    fn should_filter_dependencies(level: LevelFilter) -> bool {
        level != LevelFilter::Trace
    }

    fn build_log_config(apply_filters: bool) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        builder.set_target_level(LevelFilter::Error);

        if apply_filters {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}
