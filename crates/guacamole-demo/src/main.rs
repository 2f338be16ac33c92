use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use guacamole_log::{
    BackendConfig, ConsoleSink, Level, LogFacadeSink, LoggerConfig, LoggerRegistry, init_logging, log_to,
};

struct AssetManager;
struct World;

fn main() -> Result<()> {
    // Registry thresholds do the filtering; the backend passes the sink's target.
    init_logging(BackendConfig::default());

    let config = LoggerConfig::from_env().context("reading GUACAMOLE_* environment")?;
    let registry = Arc::new(
        LoggerRegistry::new(config, LogFacadeSink::default()).context("building logger registry")?,
    );

    let game = registry.logger_named("com.example.game.MyGdxGame");
    game.info("starting with threshold %s", &[&registry.threshold()])?;

    // Subsystems come up concurrently and each asks for its own logger.
    let workers: Vec<_> = ["assets", "world", "assets"]
        .into_iter()
        .map(|subsystem| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || -> Result<()> {
                let logger = match subsystem {
                    "assets" => registry.logger_for::<AssetManager>(),
                    _ => registry.logger_for::<World>(),
                };
                logger.debug("%s subsystem online", &[&subsystem])?;
                Ok(())
            })
        })
        .collect();

    for worker in workers {
        worker
            .join()
            .map_err(|_| anyhow::anyhow!("subsystem thread panicked"))??;
    }

    let world = registry.logger_for::<World>();
    log_to!(world, Level::Info, "{} loggers registered", registry.len());

    registry.log_tagged(Level::Warn, "Shader", "falling back to %s", &[&"GLSL 1.20"])?;

    if let Err(e) = game.error("broken template %s %s", &[&"one"]) {
        log::warn!("template error surfaced to caller: {e}");
    }

    // Shutdown output goes straight to stderr, bypassing the backend.
    registry.set_sink(ConsoleSink);
    registry.show_only_errors();
    game.info("suppressed", &[])?;
    game.error("shutting down after %d frames", &[&0])?;

    Ok(())
}
