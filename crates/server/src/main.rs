// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod routes;

#[cfg(test)]
mod tests;

use axum::Router;
use clap::Parser;
use mappatura::{AggregateCache, DEFAULT_MAX_AUTO_SKIP};
use mappatura_api::{LoadFixtureResponse, load_fixture};
use mappatura_persistence::Persistence;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use routes::{AppState, build_router};

/// Mappatura Server - HTTP server for assigning representatives to polling sections
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// JSON reference data loaded into an empty database at startup
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Seconds a request may run before it is cancelled
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,

    /// Single-child levels `/navigator` skips in one step
    #[arg(long, default_value_t = DEFAULT_MAX_AUTO_SKIP)]
    max_auto_skip: usize,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_fixture_file(
    persistence: &mut Persistence,
    cache: &Arc<AggregateCache>,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if persistence.is_seeded()? {
        info!(fixture = %path.display(), "Reference data already present; skipping fixture");
        return Ok(());
    }
    let json: String = std::fs::read_to_string(path)?;
    let loaded: LoadFixtureResponse = load_fixture(persistence, cache, &json)?;
    info!(
        fixture = %path.display(),
        regions = loaded.regions,
        municipalities = loaded.municipalities,
        sections = loaded.sections,
        representatives = loaded.representatives,
        "Loaded reference data"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("Initializing Mappatura Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let cache: Arc<AggregateCache> = Arc::new(AggregateCache::new());

    if let Some(fixture) = &args.fixture {
        load_fixture_file(&mut persistence, &cache, fixture)?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        cache,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
        max_auto_skip: args.max_auto_skip,
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
