use std::path::PathBuf;

use anyhow::Result;
use farmchain_server::{init_tracing, FarmchainServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::load(&PathBuf::from(path))?,
        None => ServerConfig::default(),
    };

    FarmchainServer::new(config).serve().await?;
    Ok(())
}
