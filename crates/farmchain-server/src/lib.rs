//! HTTP server for Farmchain.
//!
//! Wires the supply-chain workflows onto the ledger engine: batch
//! registration (with the implicit first harvest record), logistics and
//! retail event appends, the chronological journey view, chain
//! verification, and consumer scan-token lookup.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::FarmchainServer;
pub use state::AppState;

/// Install the process-wide tracing subscriber.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_target(false).init();
}
