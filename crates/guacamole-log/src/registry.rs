use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::{LoggerConfig, validate_widths};
use crate::error::{ConfigError, FormatError};
use crate::level::{Level, LevelFilter};
use crate::logger::{Logger, Shared};
use crate::names;
use crate::sink::{LogFacadeSink, Sink};

#[derive(Debug, Clone, Copy)]
struct NamingPolicy {
    abbreviate: bool,
    min_width: usize,
    max_width: usize,
}

impl NamingPolicy {
    fn display_name(&self, identifier: &str) -> String {
        let name = if self.abbreviate { names::abbreviate(identifier) } else { identifier.to_owned() };
        self.fit(name)
    }

    fn type_display_name(&self, type_name: &str) -> String {
        let name = if self.abbreviate {
            names::abbreviate_type_name(type_name)
        } else {
            names::full_type_name(type_name)
        };
        self.fit(name)
    }

    fn fit(&self, name: String) -> String {
        if self.min_width == 0 && self.max_width == 0 {
            name
        } else {
            names::fit_width(&name, self.min_width, self.max_width)
        }
    }
}

/// Owns the display-name → [`Logger`] mapping and the severity threshold.
///
/// Create one at the application's composition root and hand out references
/// (or an `Arc`) to the subsystems that need loggers. Handles are never
/// removed; they live as long as the registry and any `Arc` held elsewhere.
pub struct LoggerRegistry {
    shared: Arc<Shared>,
    naming: RwLock<NamingPolicy>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new(config: LoggerConfig, sink: impl Sink + 'static) -> Result<Self, ConfigError> {
        Self::from_shared_sink(config, Arc::new(sink))
    }

    pub fn from_shared_sink(config: LoggerConfig, sink: Arc<dyn Sink>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, sink))
    }

    /// Default configuration with a custom sink.
    pub fn with_sink(sink: impl Sink + 'static) -> Self {
        Self::build(LoggerConfig::default(), Arc::new(sink))
    }

    fn build(config: LoggerConfig, sink: Arc<dyn Sink>) -> Self {
        Self {
            shared: Arc::new(Shared::new(config.threshold, sink)),
            naming: RwLock::new(NamingPolicy {
                abbreviate: config.abbreviate,
                min_width: config.min_width,
                max_width: config.max_width,
            }),
            loggers: RwLock::new(HashMap::new()),
        }
    }

    // ── lookup ────────────────────────────────────────────────────────────

    /// Returns the logger for `display_name`, creating it on first use.
    ///
    /// The name is used verbatim; the naming policy is not applied.
    pub fn get_or_create(&self, display_name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(display_name) {
            return Arc::clone(logger);
        }

        let mut created = false;
        let logger = {
            let mut loggers = self.loggers.write();
            // Another thread may have inserted between the two locks.
            let logger = loggers.entry(display_name.to_owned()).or_insert_with(|| {
                created = true;
                Arc::new(Logger::new(display_name.to_owned(), Arc::clone(&self.shared)))
            });
            Arc::clone(logger)
        };

        // Outside the lock: a `log` backend may route back into this registry.
        if created {
            log::trace!("registered logger '{display_name}'");
        }
        logger
    }

    /// Logger for a dot-separated identifier such as `com.example.Game`,
    /// named according to the current policy.
    pub fn logger_named(&self, identifier: &str) -> Arc<Logger> {
        let name = self.naming.read().display_name(identifier);
        self.get_or_create(&name)
    }

    /// Logger for the Rust type `T`, named after its type path.
    pub fn logger_for<T: ?Sized>(&self) -> Arc<Logger> {
        let name = self.naming.read().type_display_name(std::any::type_name::<T>());
        self.get_or_create(&name)
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.loggers.read().contains_key(display_name)
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    // ── naming policy ─────────────────────────────────────────────────────

    /// Applies to loggers created afterwards.
    pub fn set_abbreviate(&self, abbreviate: bool) {
        self.naming.write().abbreviate = abbreviate;
    }

    /// Applies to loggers created afterwards. `(0, 0)` disables padding.
    pub fn set_name_width(&self, min_width: usize, max_width: usize) -> Result<(), ConfigError> {
        validate_widths(min_width, max_width)?;
        let mut naming = self.naming.write();
        naming.min_width = min_width;
        naming.max_width = max_width;
        Ok(())
    }

    // ── sink ──────────────────────────────────────────────────────────────

    /// Redirects every logger, existing and future, to `sink`.
    pub fn set_sink(&self, sink: impl Sink + 'static) {
        self.shared.set_sink(Arc::new(sink));
    }

    // ── threshold ─────────────────────────────────────────────────────────

    pub fn threshold(&self) -> LevelFilter {
        self.shared.threshold()
    }

    /// Takes effect immediately for every existing logger.
    pub fn set_threshold(&self, threshold: LevelFilter) {
        self.shared.set_threshold(threshold);
    }

    pub fn show_none(&self) {
        self.set_threshold(LevelFilter::Off);
    }

    pub fn show_only_errors(&self) {
        self.set_threshold(LevelFilter::Error);
    }

    pub fn show_info_and_errors(&self) {
        self.set_threshold(LevelFilter::Info);
    }

    pub fn show_all(&self) {
        self.set_threshold(LevelFilter::Trace);
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.shared.permits(level)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    // ── ad-hoc messages ───────────────────────────────────────────────────

    /// Logs under an arbitrary tag without registering a logger.
    pub fn log_tagged(
        &self,
        level: Level,
        tag: &str,
        template: &str,
        args: &[&dyn Display],
    ) -> Result<(), FormatError> {
        // Skip building the prefix for filtered messages.
        if !self.shared.permits(level) {
            return Ok(());
        }
        self.shared.emit(level, &format!("[{tag}]: "), template, args)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::with_sink(LogFacadeSink::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> LoggerRegistry {
        LoggerRegistry::with_sink(|_: Level, _: &str| {})
    }

    struct Sprite;

    #[test]
    fn same_name_same_handle() {
        let registry = quiet();
        let a = registry.get_or_create("c.b.Game");
        let b = registry.get_or_create("c.b.Game");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn different_names_different_handles() {
        let registry = quiet();
        let a = registry.get_or_create("A");
        let b = registry.get_or_create("B");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn logger_named_abbreviates_by_default() {
        let registry = quiet();
        let logger = registry.logger_named("com.badlogic.gdx.graphics.g2d.Sprite");
        assert_eq!(logger.name(), "c.b.g.g.g.Sprite");
        assert!(registry.contains("c.b.g.g.g.Sprite"));
    }

    #[test]
    fn logger_for_type_is_stable() {
        let registry = quiet();
        let a = registry.logger_for::<Sprite>();
        let b = registry.logger_for::<Sprite>();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.name().ends_with(".Sprite"));
    }

    #[test]
    fn logger_for_reference_and_tuple_types() {
        let registry = quiet();
        assert!(Arc::ptr_eq(&registry.logger_for::<&Sprite>(), &registry.logger_for::<Sprite>()));

        let tuple = registry.logger_for::<(Sprite, u8)>();
        assert!(tuple.name().starts_with("(g."), "{}", tuple.name());
        assert!(tuple.name().ends_with(".Sprite, u8)"), "{}", tuple.name());
    }

    #[test]
    fn full_names_when_abbreviation_disabled() {
        let registry = quiet();
        registry.set_abbreviate(false);
        assert_eq!(registry.logger_named("com.example.Game").name(), "com.example.Game");
    }

    #[test]
    fn policy_is_not_retroactive() {
        let registry = quiet();
        let before = registry.logger_named("com.example.Game");
        registry.set_name_width(10, 10).unwrap();
        let after = registry.logger_named("com.example.Game");

        assert_eq!(before.name(), "c.e.Game");
        assert_eq!(after.name(), "c.e.Game  ");
        assert!(!Arc::ptr_eq(&before, &after));
        // The old handle keeps its name and is still registered.
        assert!(Arc::ptr_eq(&before, &registry.get_or_create("c.e.Game")));
    }

    #[test]
    fn rejects_inverted_widths() {
        let registry = quiet();
        assert_eq!(
            registry.set_name_width(8, 4),
            Err(ConfigError::WidthRange { min: 8, max: 4 })
        );
    }

    #[test]
    fn new_validates_config() {
        let config = LoggerConfig { min_width: 9, max_width: 3, ..LoggerConfig::default() };
        assert!(LoggerRegistry::new(config, |_: Level, _: &str| {}).is_err());
    }

    #[test]
    fn threshold_shortcuts() {
        let registry = quiet();
        assert_eq!(registry.threshold(), LevelFilter::Info);

        registry.show_none();
        assert!(!registry.is_error_enabled());

        registry.show_only_errors();
        assert!(registry.is_error_enabled());
        assert!(!registry.is_info_enabled());

        registry.show_info_and_errors();
        assert!(registry.is_info_enabled());
        assert!(!registry.is_debug_enabled());

        registry.show_all();
        assert!(registry.is_enabled(Level::Trace));
    }
}
