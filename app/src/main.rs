use std::sync::Arc;

use settings::Settings;
use tokio::sync::Mutex;

use crate::adapter::open_meteo::OpenMeteoClient;
use crate::hvac::SmartHvac;

mod adapter;
mod core;
mod hvac;
pub mod port;
mod settings;

struct Infrastructure {
    weather_client: OpenMeteoClient,
}

#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    let settings = Settings::new().expect("Error reading configuration");

    let infrastructure = Infrastructure::init(&settings).expect("Error initializing infrastructure");

    let hvac = Arc::new(Mutex::new(SmartHvac::new(
        settings.location.clone(),
        settings.room.clone().into(),
        settings.chart.history,
        infrastructure.weather_client,
    )));

    tracing::info!(
        "Starting smart HVAC control for {} ({}, {})",
        settings.location.city,
        settings.location.latitude,
        settings.location.longitude
    );

    settings
        .http_server
        .run_server(move || vec![adapter::web::new_routes(hvac.clone())])
        .await
        .expect("HTTP server execution failed");
}

impl Infrastructure {
    pub fn init(settings: &Settings) -> anyhow::Result<Self> {
        settings.monitoring.init().expect("Error initializing monitoring");

        let weather_client = settings.weather.new_client(&settings.http_client)?;

        Ok(Self { weather_client })
    }
}
