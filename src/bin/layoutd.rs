use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use factory_planner::store::{LayoutStore, MemoryStore, layout_router};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Address the layout endpoint binds to.
    #[arg(long, default_value = "127.0.0.1:4600")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let store: Arc<dyn LayoutStore> = Arc::new(MemoryStore::default());

    let listener = TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    tracing::info!("layout server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, layout_router(store))
        .await
        .context("layout server failed")?;
    Ok(())
}
