use std::sync::Once;

use crate::sink::LogFacadeSink;

/// `env_logger` backend for registries that write through [`LogFacadeSink`].
///
/// Registry thresholds already filter what reaches the facade, so by default
/// the sink's target is let through at every level while other crates stay
/// at `info`. An explicit `env_filter` (or `RUST_LOG`) replaces that default
/// entirely; it follows the `env_logger` syntax, e.g. `"guacamole=debug,wgpu=warn"`.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub env_filter: Option<String>,
    /// Target used by the registry's [`LogFacadeSink`].
    pub facade_target: String,
    /// Print the record target next to the level. Off by default, since the
    /// message already starts with the logger's display name.
    pub show_target: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            facade_target: LogFacadeSink::DEFAULT_TARGET.to_owned(),
            show_target: false,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl BackendConfig {
    /// Builds the `env_logger` builder. `fallback_filter` stands in for
    /// `RUST_LOG` when no explicit filter is configured.
    fn builder(&self, fallback_filter: Option<String>) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();

        match self.env_filter.clone().or(fallback_filter) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module(&self.facade_target, log::LevelFilter::Trace);
            }
        }

        builder.format_target(self.show_target).write_style(self.write_style);
        builder
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the process-wide `log` backend.
///
/// Idempotent; only the first call has an effect. Intended usage is early
/// in `main`, before the registry is built.
pub fn init_logging(config: BackendConfig) {
    INIT.call_once(|| {
        let mut builder = config.builder(std::env::var("RUST_LOG").ok());

        // Another backend may already be installed (e.g. by a test harness).
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging backend initialized for target '{}'", config.facade_target);
    });
}
