//! Token balance server.
//!
//! Usage:
//!   cargo run -p hopla_tokens --bin token-server -- --store file --data-file users.json
//!
//! Then:
//!   curl 'http://localhost:8888/api/user-data?deviceId=device_x'

use clap::{Parser, ValueEnum};
use hopla_tokens::{router, AnyStore, FileStore, MemoryStore};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StoreKind {
    Memory,
    File,
}

#[derive(Parser, Debug)]
#[command(name = "token-server")]
#[command(about = "Per-device token balance API")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8888")]
    port: u16,

    /// Where balances are kept
    #[arg(short, long, value_enum, default_value = "memory")]
    store: StoreKind,

    /// JSON file used by the file store
    #[arg(short, long, default_value = "hopla_users.json")]
    data_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let store = match args.store {
        StoreKind::Memory => AnyStore::Memory(MemoryStore::new()),
        StoreKind::File => AnyStore::File(FileStore::open(&args.data_file).await?),
    };

    let app = router(Arc::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Token server listening on http://{}", addr);
    tracing::info!("Store: {:?}", args.store);

    axum::serve(listener, app).await?;

    Ok(())
}
