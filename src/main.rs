use axum::http::HeaderValue;
use humantime::format_duration;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tablegate::auth::shared::SharedPassword;
use tablegate::db::Database;
use tablegate::model::service;
use tablegate::store::config::JsonFileConfig;
use tablegate::store::memory::InMemorySessionStore;
use tablegate::store::sweeper;
use tablegate::utils::clock::SystemClock;
use tablegate::{shutdown_signal, ConfigStore};
use tokio_util::sync::CancellationToken;

use clap::Parser;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SQLite table browser http service
#[derive(Parser, Debug)]
#[command(version, name = "tablegate", about, long_about = None)]
struct Args {
    /// Server port
    #[arg(long, env, default_value = "6969")]
    port: u16,
    /// SQLite database file
    #[arg(long, env, default_value = "db.sqlite")]
    db_path: PathBuf,
    /// JSON config file with the shared password
    #[arg(long, env, default_value = "config.json")]
    config: PathBuf,
    /// Origin allowed to call the API with credentials
    #[arg(long, env, default_value = "http://localhost:8888")]
    cors_origin: String,
    /// Expired session cleanup interval
    #[arg(long, env, default_value = "1h", value_parser = humantime::parse_duration)]
    sweep_interval: Duration,
}

async fn main_int(args: Args) -> anyhow::Result<()> {
    log::info!("Starting tablegate");
    tracing::info!(version = env!("CARGO_PKG_VERSION"));
    tracing::info!(port = args.port, "cfg");
    tracing::info!(db_path = %args.db_path.display(), "cfg");
    tracing::info!(config = %args.config.display(), "cfg");
    tracing::info!(cors_origin = args.cors_origin, "cfg");
    tracing::info!(
        sweep_interval = format_duration(args.sweep_interval).to_string(),
        "cfg"
    );

    let config: Arc<dyn ConfigStore + Send + Sync> = Arc::new(JsonFileConfig::load(&args.config)?);
    let settings = config.get().await?;
    tracing::info!(
        session_duration = format_duration(Duration::from_millis(
            settings.auth.session_duration.max(0) as u64
        ))
        .to_string(),
        password_changed = settings.auth.password_changed,
        "cfg"
    );
    if !settings.auth.password_changed {
        tracing::warn!("Default password in use, change it after login");
    }

    let db = Database::connect(&args.db_path, false).await?;

    let service_data = service::Data {
        store: Box::new(InMemorySessionStore::new()),
        auth_service: Box::new(SharedPassword::new(config.clone())),
        config,
        clock: Box::new(SystemClock),
        db,
    };
    let quarded_data = Arc::new(service_data);

    let cancel = CancellationToken::new();
    let sweeper = sweeper::spawn(quarded_data.clone(), args.sweep_interval, cancel.clone());

    let app = tablegate::service(quarded_data, args.cors_origin.parse::<HeaderValue>()?);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let handle = axum_server::Handle::new();
    let shutdown_future = shutdown_signal_handle(handle.clone(), cancel.clone());
    tokio::spawn(shutdown_future);

    tracing::info!(addr = format!("{}", addr), "listening");
    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    cancel.cancel();
    sweeper.await?;
    tracing::info!("Bye");
    Ok(())
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();
    let args = Args::parse();
    if let Err(e) = main_int(args).await {
        log::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn shutdown_signal_handle(handle: axum_server::Handle, cancel: CancellationToken) {
    shutdown_signal().await;
    tracing::trace!("Received termination signal shutting down");
    cancel.cancel();
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
