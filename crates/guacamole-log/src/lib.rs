//! Formatted logger handles with abbreviated class-name prefixes.
//!
//! A [`LoggerRegistry`] hands out one [`Logger`] per display name. Display
//! names are derived from a dot-separated identifier (or a Rust type path)
//! and abbreviated by default, so `com.badlogic.gdx.graphics.g2d.Sprite`
//! logs as `c.b.g.g.g.Sprite`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`names`] | `abbreviate`, type-path normalization, width fitting |
//! | [`level`] | `Level`, `LevelFilter` |
//! | [`template`] | printf-style `render` |
//! | [`sink`] | `Sink`, `LogFacadeSink`, `ConsoleSink` |
//! | [`registry`] | `LoggerRegistry` |
//! | [`backend`] | `env_logger` installation |
//!
//! # Quick start
//!
//! ```rust
//! use guacamole_log::{ConsoleSink, LoggerRegistry};
//!
//! let registry = LoggerRegistry::with_sink(ConsoleSink);
//! let logger = registry.logger_named("com.example.game.World");
//! assert_eq!(logger.name(), "c.e.g.World");
//!
//! logger.info("loaded %d chunks", &[&16]).unwrap();
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod level;
mod logger;
pub mod names;
pub mod registry;
pub mod sink;
pub mod template;

pub use backend::{BackendConfig, init_logging};
pub use config::LoggerConfig;
pub use error::{ConfigError, FormatError};
pub use level::{Level, LevelFilter};
pub use logger::Logger;
pub use names::abbreviate;
pub use registry::LoggerRegistry;
pub use sink::{ConsoleSink, LogFacadeSink, Sink};
