//! Terminal driver: advances the colony on a fixed interval and prints each frame.

mod telemetry;

use anyhow::{bail, Context, Result};
use colony_core::DriverConfig;
use colony_world::Simulation;
use tokio::signal;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_logging()?;

    let config = load_config()?;
    info!(
        width = config.simulation.world.width,
        height = config.simulation.world.height,
        seed = ?config.simulation.seed,
        tick_interval_ms = config.tick_interval_ms,
        max_ticks = ?config.max_ticks,
        "Starting colony"
    );

    let mut simulation = construct(&config)?;
    run(&mut simulation, &config).await;
    simulation.log_summary();

    Ok(())
}

/// Defaults, overridden by a JSON file given as the first argument and then by `COLONY_SEED`
fn load_config() -> Result<DriverConfig> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => DriverConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => DriverConfig::default(),
    };

    if let Ok(raw) = std::env::var("COLONY_SEED") {
        let seed = raw
            .parse::<u64>()
            .with_context(|| format!("COLONY_SEED is not a valid u64: {}", raw))?;
        config.simulation.seed = Some(seed);
    }

    config.simulation.validate()?;
    Ok(config)
}

/// Build the simulation, drawing a new grid while the draw leaves no ants or no fruit.
///
/// A configured seed is bumped per attempt so retries see fresh randomness.
fn construct(config: &DriverConfig) -> Result<Simulation> {
    let attempts = config.construction_attempts.max(1);

    for attempt in 0..attempts {
        let mut sim_config = config.simulation.clone();
        sim_config.seed = sim_config
            .seed
            .map(|seed| seed.wrapping_add(attempt as u64));

        match Simulation::from_config(&sim_config) {
            Ok(simulation) => return Ok(simulation),
            Err(e) if e.is_retryable() => {
                warn!(attempt = attempt + 1, attempts, error = %e, "Construction failed, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }

    bail!(
        "no usable grid after {} attempts; raise ant_rate/fruit_rate or enlarge the grid",
        attempts
    )
}

async fn run(simulation: &mut Simulation, config: &DriverConfig) {
    let mut ticker = interval(Duration::from_millis(config.tick_interval_ms.max(1)));
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        if config.max_ticks.map_or(false, |max| simulation.tick() >= max) {
            info!(ticks = simulation.tick(), "Tick budget reached");
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {
                simulation.advance();
                print!("{}", simulation.frame());
            }
            _ = &mut shutdown => break,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
