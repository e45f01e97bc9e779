//! MINT HTTP Server Binary
//!
//! Main entry point for the MINT REST API server. It loads configuration,
//! prepares the emulator adapter and form options, sets up the HTTP router
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! MINT_CONFIG=backend/mint.toml cargo run --bin mint-server
//! ```
//!
//! # Environment Variables
//!
//! - `MINT_CONFIG`: Path to the TOML config (default: search for `mint.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `MINT_EMULATOR_COMMAND`: Emulator executable
//! - `MINT_FORM_OPTIONS_PATH`: Dynamic form options asset
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mint_server::config::ServerConfig;
use mint_server::emulator::{Emulator, ProcessEmulator};
use mint_server::http::{create_router, AppState};
use mint_server::services::get_dynamic_form_options;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting MINT HTTP Server");

    let config = ServerConfig::load()?;

    let emulator = ProcessEmulator::from_settings(&config.emulator);
    info!(
        "Emulator command '{}' (minte {}), timeout {}s",
        emulator.command(),
        emulator.version(),
        emulator.timeout().as_secs()
    );

    let form_options = get_dynamic_form_options(&config.resources.form_options_path)?;
    info!(
        "Form options loaded from {}",
        config.resources.form_options_path.display()
    );

    let state = AppState::new(Arc::new(emulator), form_options);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
