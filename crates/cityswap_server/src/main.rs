//! CitySwap API Server
//!
//! REST surface for the geolocated cash/online swap matcher

use cityswap_server::{ServerConfig, start_server};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> miette::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .build(),
        )
    }))?;
    miette::set_panic_hook();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("cityswap_server=debug,cityswap_core=debug,cityswap_api=debug")
        }))
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = ServerConfig::from_env();

    start_server(config).await.into_diagnostic()?;

    Ok(())
}
