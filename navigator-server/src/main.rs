use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use navigator_server::config::ServerConfig;
use navigator_server::network::NetworkFile;
use navigator_server::planner::FinderConfig;
use navigator_server::simulation::{self, Fleet, SimulationConfig};
use navigator_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Load the network (fail fast if invalid)
    let file = match &config.network_file {
        Some(path) => {
            info!(path = %path.display(), "loading network file");
            NetworkFile::load(path)?
        }
        None => {
            info!("using built-in sample network");
            NetworkFile::sample()?
        }
    };
    let (network, buses) = file.into_parts()?;
    let network = Arc::new(network);
    info!(
        stops = network.stops().len(),
        routes = network.routes().len(),
        buses = buses.len(),
        "network loaded"
    );

    // Spawn the bus simulation
    let fleet = Fleet::new(buses);
    let simulation_config = SimulationConfig {
        tick_interval: config.tick_interval,
        ..SimulationConfig::default()
    };
    tokio::spawn(simulation::run(
        fleet.clone(),
        network.clone(),
        simulation_config,
    ));

    // Build app state
    let finder_config = FinderConfig::default().with_max_results(config.max_suggestions);
    let state = AppState::new(network, fleet, finder_config);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "bus navigator listening");
    info!("  GET  /health                                   - Health check");
    info!("  GET  /api/stops                                - All stops");
    info!("  GET  /api/stops/:id                            - One stop and its routes");
    info!("  GET  /api/routes                               - All routes");
    info!("  GET  /api/buses                                - Live bus positions");
    info!("  GET  /api/suggestions?origin=..&destination=.. - Route suggestions");

    axum::serve(listener, app).await?;
    Ok(())
}
