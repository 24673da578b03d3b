//! Subcount Daemon
//!
//! Scrolls a channel's subscriber count across a MAX7219 LED matrix and
//! pulses an indicator pixel whenever the count goes up.

mod config;
mod engine;
mod indicator;
mod panel;
mod rendering;
mod stats;

use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tokio::signal::unix::Signal;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use engine::Engine;
use indicator::Indicator;
use panel::Panel;
use stats::{FileSource, PersistedState, StateFile};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());

    let config = Config::load(&config_path).context("Failed to load configuration")?;
    info!("Loaded configuration from: {}", config_path);

    let indicator = Indicator::new(&config.indicator);
    indicator.show_on().await;

    // Restore credentials and the last displayed counts
    let mut state_file = StateFile::new(&config.state_file);
    let persisted = state_file.load().unwrap_or_else(|| {
        info!("No saved state, starting from zero");
        PersistedState::default()
    });
    if persisted.has_credentials() {
        info!("Channel: {}", persisted.channel_id);
    } else {
        warn!(
            "No API key provisioned in {:?}. Stats will not be fetched.",
            state_file.path()
        );
    }
    info!("Displayed stats: {}", persisted.snapshot);

    let mut panel = Panel::open(&config.panel).await;
    if !panel.is_connected() {
        info!("Panel output: headless");
    }
    let mut source = FileSource::new(&config.source.path);
    let mut engine = Engine::new(&config, persisted, Instant::now());

    // Ready
    indicator.pulse().await;

    // Setup Unix signal handlers
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
    let mut sighup = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())?;

    let ctx = LoopContext {
        config_path: &config_path,
        tick: Duration::from_millis(config.tick),
        engine: &mut engine,
        source: &mut source,
        state_file: &mut state_file,
        panel: &mut panel,
        indicator: &indicator,
        sighup: &mut sighup,
    };
    tokio::select! {
        _ = render_loop(ctx) => {}
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
    }

    if let Err(e) = panel.set_enabled(false).await {
        warn!("Failed to blank panel: {}", e);
    }
    indicator.off().await;

    Ok(())
}

/// Minimum time between two logged flush errors of the same run.
const ERROR_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Rate limit for repeated panel flush errors.
///
/// The first error of a run is logged at once; later ones at most once per
/// [`ERROR_LOG_INTERVAL`], with a count of the errors since the last line.
/// A successful flush ends the run.
struct ErrorThrottle {
    consecutive: u32,
    suppressed: u32,
    last_log: Instant,
}

impl ErrorThrottle {
    fn new(now: Instant) -> Self {
        Self {
            consecutive: 0,
            suppressed: 0,
            last_log: now,
        }
    }

    /// Records an error at `now`. Returns the number of errors the log line
    /// covers and the time since the previous line, or `None` to stay quiet.
    fn on_error(&mut self, now: Instant) -> Option<(u32, Duration)> {
        self.consecutive += 1;
        let elapsed = now.saturating_duration_since(self.last_log);
        if self.consecutive == 1 || elapsed >= ERROR_LOG_INTERVAL {
            let repeated = self.suppressed + 1;
            self.suppressed = 0;
            self.last_log = now;
            Some((repeated, elapsed))
        } else {
            self.suppressed += 1;
            None
        }
    }

    fn on_success(&mut self) {
        self.consecutive = 0;
        self.suppressed = 0;
    }
}

/// Everything the render loop borrows from `main`.
struct LoopContext<'a> {
    config_path: &'a str,
    tick: Duration,
    engine: &'a mut Engine,
    source: &'a mut FileSource,
    state_file: &'a mut StateFile,
    panel: &'a mut Panel,
    indicator: &'a Indicator,
    sighup: &'a mut Signal,
}

/// Re-reads the configuration file and applies the panel settings.
///
/// Only `[panel] intensity` and `enabled` take effect without a restart.
async fn reload_panel(config_path: &str, panel: &mut Panel) {
    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to reload configuration: {:#}", e);
            return;
        }
    };
    match panel.apply(&config.panel).await {
        Ok(()) => info!(
            "Reloaded panel settings (intensity: {}, enabled: {})",
            config.panel.intensity, config.panel.enabled
        ),
        Err(e) => warn!("Failed to apply panel settings: {}", e),
    }
}

async fn render_loop(ctx: LoopContext<'_>) {
    let LoopContext {
        config_path,
        tick,
        engine,
        source,
        state_file,
        panel,
        indicator,
        sighup,
    } = ctx;
    let mut flush_errors = ErrorThrottle::new(Instant::now());

    loop {
        let report = engine.tick(Instant::now(), source, state_file);
        if report.should_flash() {
            info!("Subscriber count rose to {}", engine.displayed().subscribers);
            indicator.pulse().await;
        }
        if report.wrapped {
            debug!("Scroll wrapped to x={}", engine.scroll_x());
        }

        match panel.flush(engine.surface()).await {
            Ok(()) => flush_errors.on_success(),
            Err(e) => match flush_errors.on_error(Instant::now()) {
                Some((1, _)) => warn!("Panel flush error: {}", e),
                Some((repeated, elapsed)) => warn!(
                    "Panel flush error (repeated {} times in {:?}): {}",
                    repeated, elapsed, e
                ),
                None => {}
            },
        }

        tokio::select! {
            _ = tokio::time::sleep(tick) => {}
            _ = sighup.recv() => {
                info!("Received SIGHUP, reloading panel settings");
                reload_panel(config_path, panel).await;
            }
        }
    }
}
