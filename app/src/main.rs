use infrastructure::BusItemClient;
use settings::Settings;

use crate::adapter::venus::VenusSystem;
use crate::heater::HeaterService;

mod adapter;
mod heater;
mod port;
mod settings;

#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    let settings = Settings::new().expect("Error reading configuration");

    settings
        .monitoring
        .init()
        .expect("Error initializing tracing");

    let client = BusItemClient::connect(&settings.dbus)
        .await
        .expect("Error connecting to D-Bus");
    let bus = VenusSystem::new(client, settings.heater.max_relays);

    let service = HeaterService::new(bus, &settings.heater);

    tracing::info!("Starting main loop");

    tokio::select!(
        _ = service.run() => {},
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received, exiting");
        }
    );
}

async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate()).expect("Error installing SIGTERM handler");

    tokio::select!(
        _ = tokio::signal::ctrl_c() => {},
        _ = sigterm.recv() => {},
    );
}
