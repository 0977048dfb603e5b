//! Backend entry-point: parses configuration, initialises tracing, and runs
//! the HTTP server.

use std::net::SocketAddr;

use clap::Parser;
use gazetteer::outbound::persistence::{DbPool, PoolConfig};
use gazetteer::server::{self, ServerConfig};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "gazetteer", about = "REST API over states and their cities")]
struct Cli {
    /// Socket address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// PostgreSQL connection URL. Without it the server runs on an
    /// in-memory store.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    db_pool_size: u32,

    /// Load the sample dataset on startup.
    #[arg(long)]
    seed: bool,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();

    let mut config = ServerConfig::new(cli.bind).with_seed(cli.seed);
    if let Some(url) = cli.database_url {
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(cli.db_pool_size))
            .await
            .map_err(|err| std::io::Error::other(format!("pool build failed: {err}")))?;
        config = config.with_db_pool(pool);
    }

    server::run(config).await
}
