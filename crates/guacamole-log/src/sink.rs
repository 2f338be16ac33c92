use std::io::Write;

use crate::level::Level;

/// Destination for formatted log messages.
///
/// The message already carries the logger prefix; sinks only decide where it
/// goes. Any `Fn(Level, &str) + Send + Sync` closure is a sink.
pub trait Sink: Send + Sync {
    fn emit(&self, level: Level, message: &str);
}

impl<F> Sink for F
where
    F: Fn(Level, &str) + Send + Sync,
{
    fn emit(&self, level: Level, message: &str) {
        self(level, message)
    }
}

/// Forwards messages to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogFacadeSink {
    target: String,
}

impl LogFacadeSink {
    pub const DEFAULT_TARGET: &'static str = "guacamole";

    pub fn with_target(target: impl Into<String>) -> Self {
        Self { target: target.into() }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogFacadeSink {
    fn default() -> Self {
        Self::with_target(Self::DEFAULT_TARGET)
    }
}

impl Sink for LogFacadeSink {
    fn emit(&self, level: Level, message: &str) {
        let level: log::Level = level.into();
        log::log!(target: &self.target, level, "{message}");
    }
}

/// Writes `[LEVEL] message` lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub(crate) fn line(level: Level, message: &str) -> String {
        format!("[{}] {message}", level.label())
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, level: Level, message: &str) {
        let mut err = std::io::stderr().lock();
        // A closed stderr is not something a logger can report.
        let _ = writeln!(err, "{}", Self::line(level, message));
    }
}
