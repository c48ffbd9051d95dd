use std::path::PathBuf;

use clap::Parser;
use tablegate::db::{seed, Database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Creates a sample SQLite database for tablegate
#[derive(Parser, Debug)]
#[command(version, name = "setup-db", about, long_about = None)]
struct Args {
    /// SQLite database file, created when missing
    #[arg(long, env, default_value = "db.sqlite")]
    db_path: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();
    let args = Args::parse();
    let db = Database::connect(&args.db_path, true).await?;
    seed::sample_data(&db).await?;
    tracing::info!(path = %args.db_path.display(), "sample database created");
    Ok(())
}
