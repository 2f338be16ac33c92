use crate::error::ConfigError;
use crate::level::LevelFilter;

/// Registry configuration.
///
/// Naming fields (`abbreviate`, `min_width`, `max_width`) are applied when a
/// handle is created; changing them later does not rename existing handles.
/// `threshold` is shared with every handle and takes effect immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub abbreviate: bool,
    /// Display names shorter than this are right-padded with spaces. `0` disables.
    pub min_width: usize,
    /// Display names longer than this keep only their trailing characters. `0` disables.
    pub max_width: usize,
    pub threshold: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            abbreviate: true,
            min_width: 0,
            max_width: 0,
            threshold: LevelFilter::Info,
        }
    }
}

impl LoggerConfig {
    pub const ENV_LEVEL: &'static str = "GUACAMOLE_LOG_LEVEL";
    pub const ENV_ABBREVIATE: &'static str = "GUACAMOLE_ABBREVIATE";
    pub const ENV_NAME_WIDTH: &'static str = "GUACAMOLE_NAME_WIDTH";

    /// Reads overrides from the process environment. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(level) = lookup(Self::ENV_LEVEL) {
            config.threshold = level.parse()?;
        }

        if let Some(flag) = lookup(Self::ENV_ABBREVIATE) {
            config.abbreviate = parse_flag(&flag).ok_or_else(|| ConfigError::InvalidValue {
                key: Self::ENV_ABBREVIATE,
                value: flag.clone(),
            })?;
        }

        if let Some(width) = lookup(Self::ENV_NAME_WIDTH) {
            let (min, max) = parse_width(&width).ok_or_else(|| ConfigError::InvalidValue {
                key: Self::ENV_NAME_WIDTH,
                value: width.clone(),
            })?;
            config.min_width = min;
            config.max_width = max;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_widths(self.min_width, self.max_width)
    }
}

pub(crate) fn validate_widths(min: usize, max: usize) -> Result<(), ConfigError> {
    if max != 0 && min > max {
        return Err(ConfigError::WidthRange { min, max });
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// `"min:max"`, or a single number used for both bounds.
fn parse_width(raw: &str) -> Option<(usize, usize)> {
    match raw.split_once(':') {
        Some((min, max)) => Some((min.trim().parse().ok()?, max.trim().parse().ok()?)),
        None => {
            let w = raw.trim().parse().ok()?;
            Some((w, w))
        }
    }
}
