use anyhow::Result;
use billwatch::portal::{FetchOutcome, PortalClient};
use billwatch::{Config, sensor};
use tokio::time::{Duration, interval};
use tracing::{debug, error, info};

/// Host tick period; the portal client's own throttle gates actual fetches
const TICK_SECONDS: u64 = 60;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    billwatch::logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(
        "Billwatch {} starting up for consumer {}",
        env!("APP_VERSION"),
        config.account.consumer_number
    );

    let mut client = PortalClient::new(&config);
    let mut sensors = sensor::build_sensors(&config);

    let mut ticker = interval(Duration::from_secs(TICK_SECONDS));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match client.refresh_if_due().await {
                    FetchOutcome::Updated => {
                        for s in &mut sensors {
                            s.update(client.document());
                            match s.state() {
                                Some(value) => info!(
                                    "{} ({}): {}",
                                    s.name(),
                                    s.unique_id(),
                                    value
                                ),
                                None => debug!("{}: no value yet", s.unique_id()),
                            }
                        }
                    }
                    FetchOutcome::Throttled => debug!("Fetch throttled; next tick will retry"),
                    FetchOutcome::Failed { reason } => {
                        error!("Bill fetch failed, keeping previous values: {}", reason);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    Ok(())
}
