//! Stonkwatch - a terminal dashboard for equities and option contracts.
//!
//! Logs go to a daily-rotated file in the platform data directory because
//! the terminal belongs to the UI.

use stonkwatch::{App, Config, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let _log_guard = init_logging()?;

    // Load configuration
    let config = Config::load_or_default()?;

    // Run the application
    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}

fn init_logging() -> Result<WorkerGuard> {
    let log_dir = stonkwatch::config::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::daily(log_dir, "stonkwatch.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stonkwatch=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(guard)
}
