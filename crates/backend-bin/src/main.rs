use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use backend_lib::{config::Settings, router, AppState};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Signup server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, default_value = backend_lib::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(level: &str, json: bool) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_from(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    if let Some(bind) = cli.bind {
        settings.bind_addr = bind;
    }
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    settings.validate()?;

    init_tracing(&settings.log_level, cli.json_logs);

    let seed_user = settings.seed_user.clone();
    let addr = settings.bind_addr;
    let cleanup_interval = settings.session_cleanup_interval();

    let state = Arc::new(AppState::new(settings));
    if let Some(sessions) = &state.sessions {
        sessions.spawn_cleanup(cleanup_interval);
    }
    if let Some(seed) = &seed_user {
        state.signup.ensure_user(seed).await?;
    }

    let app = router::create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
