mod domain;
mod messages;
mod backend;
mod store;
mod clients;

mod app_system;
mod console;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, warn, Instrument};
use crate::app_system::{setup_tracing, RentalSystem, SyncConfig};
use crate::domain::DashboardCards;

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = SyncConfig::from_env().map_err(|e| e.to_string())?;
    info!(api_base = %config.api_base, poll_secs = config.poll_interval.as_secs(), "Starting rental sync client");

    let system = RentalSystem::start(&config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("initialize");
    match system.client.initialize().instrument(span).await {
        Ok(snapshot) => {
            info!(
                actor = %snapshot.session.actor_name,
                role = %snapshot.session.role,
                cars = snapshot.cars.len(),
                "Client state loaded"
            );
            if let Some(DashboardCards::Customer { available_cars, cart_items, my_bookings }) =
                snapshot.dashboard.as_ref().map(|d| &d.cards)
            {
                info!(available_cars, cart_items, my_bookings, "Dashboard ready");
            }
        }
        Err(e) => warn!(error = %e, "Initial load incomplete, polling will retry"),
    }

    tokio::select! {
        result = console::run_console(system.client.clone()) => {
            if let Err(e) = result {
                error!(error = %e, "Console stopped");
            }
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
        }
    }

    system.shutdown().await?;
    info!("Rental sync client stopped");
    Ok(())
}
