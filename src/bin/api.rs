//! Noteful API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use noteful::api::{self, Config, DEFAULT_HOST, DEFAULT_PORT, ServerError};
use noteful::db::{Database, DbError, NamedRepository, SqliteDatabase, seed};
use noteful::paths::get_db_path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(noteful::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(noteful::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(noteful::binary::api))]
    Api(#[from] ServerError),
}

#[derive(Parser)]
#[command(name = "noteful")]
#[command(author, version, about = "Noteful API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, env = "NOTEFUL_HOST", default_value = DEFAULT_HOST)]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "NOTEFUL_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Database file path (defaults to ~/.local/share/noteful/noteful.db)
    #[arg(long, env = "NOTEFUL_DB")]
    db: Option<PathBuf>,

    /// Load the fixed seed folders, tags and notes before serving
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    api::init_tracing();
    serve(Cli::parse()).await?;
    Ok(())
}

async fn serve(cli: Cli) -> Result<(), BinaryError> {
    let db_path = cli.db.unwrap_or_else(get_db_path);

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    info!("Opening database at {}", db_path.display());
    let db = SqliteDatabase::open(&db_path).await?;

    db.migrate().await?;
    info!("Database migrations complete");

    if cli.seed {
        if db.folders().count().await? == 0 {
            seed::load(&db).await?;
        } else {
            info!("Store already holds data, skipping seed");
        }
    }

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        db,
    )
    .await?;

    Ok(())
}
