use std::fmt::{self, Display};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::RwLock;

use crate::error::FormatError;
use crate::level::{Level, LevelFilter};
use crate::sink::Sink;
use crate::template;

/// State every handle of one registry shares with it.
pub(crate) struct Shared {
    threshold: AtomicU8,
    sink: RwLock<Arc<dyn Sink>>,
}

impl Shared {
    pub(crate) fn new(threshold: LevelFilter, sink: Arc<dyn Sink>) -> Self {
        Self { threshold: AtomicU8::new(threshold.as_u8()), sink: RwLock::new(sink) }
    }

    #[inline]
    pub(crate) fn threshold(&self) -> LevelFilter {
        LevelFilter::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    pub(crate) fn set_threshold(&self, threshold: LevelFilter) {
        self.threshold.store(threshold.as_u8(), Ordering::Relaxed);
    }

    pub(crate) fn set_sink(&self, sink: Arc<dyn Sink>) {
        *self.sink.write() = sink;
    }

    /// The lock is released before the sink runs, so a sink may log or swap
    /// sinks itself.
    fn forward(&self, level: Level, message: &str) {
        let sink = Arc::clone(&self.sink.read());
        sink.emit(level, message);
    }

    #[inline]
    pub(crate) fn permits(&self, level: Level) -> bool {
        self.threshold().permits(level)
    }

    /// Renders and forwards one message. Nothing is formatted when `level`
    /// is filtered out.
    pub(crate) fn emit(
        &self,
        level: Level,
        prefix: &str,
        template: &str,
        args: &[&dyn Display],
    ) -> Result<(), FormatError> {
        if !self.permits(level) {
            return Ok(());
        }
        let body = template::render(template, args)?;
        self.forward(level, &format!("{prefix}{body}"));
        Ok(())
    }

    pub(crate) fn emit_fmt(&self, level: Level, prefix: &str, args: fmt::Arguments<'_>) {
        if !self.permits(level) {
            return;
        }
        let body = template::render_args(args);
        self.forward(level, &format!("{prefix}{body}"));
    }
}

/// A logger bound to one display name.
///
/// Obtained from [`LoggerRegistry`](crate::LoggerRegistry); equal display
/// names always yield the same `Arc<Logger>`. Messages are prefixed with
/// `[name]: `, so `logger.error("something went %s!", &[&"wrong"])` emits
///
/// ```text
/// [c.b.g.m.MyGdxGame]: something went wrong!
/// ```
pub struct Logger {
    name: String,
    prefix: String,
    shared: Arc<Shared>,
}

impl Logger {
    pub(crate) fn new(name: String, shared: Arc<Shared>) -> Self {
        let prefix = format!("[{name}]: ");
        Self { name, prefix, shared }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.shared.permits(level)
    }

    /// Formats `template` with `args` (see [`template`](crate::template)) and
    /// forwards it if the registry threshold permits `level`.
    pub fn log(&self, level: Level, template: &str, args: &[&dyn Display]) -> Result<(), FormatError> {
        self.shared.emit(level, &self.prefix, template, args)
    }

    /// Forwards a `format_args!` message. Prefer the [`log_to!`](crate::log_to) macro.
    pub fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        self.shared.emit_fmt(level, &self.prefix, args);
    }

    pub fn error(&self, template: &str, args: &[&dyn Display]) -> Result<(), FormatError> {
        self.log(Level::Error, template, args)
    }

    pub fn warn(&self, template: &str, args: &[&dyn Display]) -> Result<(), FormatError> {
        self.log(Level::Warn, template, args)
    }

    pub fn info(&self, template: &str, args: &[&dyn Display]) -> Result<(), FormatError> {
        self.log(Level::Info, template, args)
    }

    pub fn debug(&self, template: &str, args: &[&dyn Display]) -> Result<(), FormatError> {
        self.log(Level::Debug, template, args)
    }

    pub fn trace(&self, template: &str, args: &[&dyn Display]) -> Result<(), FormatError> {
        self.log(Level::Trace, template, args)
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Logger{{prefix={}}}", self.prefix)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("threshold", &self.shared.threshold())
            .finish()
    }
}

/// Logs a `format!`-style message through a [`Logger`].
///
/// ```rust
/// use guacamole_log::{Level, LoggerRegistry, log_to};
///
/// let registry = LoggerRegistry::with_sink(|_: Level, _: &str| {});
/// let logger = registry.logger_named("game.World");
/// log_to!(logger, Level::Info, "spawned {} entities", 12);
/// ```
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_enabled(level) {
            logger.log_fmt(level, format_args!($($arg)+));
        }
    }};
}
