use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use infrastructure::{HttpClientConfig, HttpServerConfig, MonitoringConfig};
use serde::Deserialize;

use crate::adapter::open_meteo::OpenMeteoConfig;
use crate::hvac::{HistoryMode, Location, RoomDefaults};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub http_server: HttpServerConfig,
    #[serde(default)]
    pub http_client: HttpClientConfig,
    pub monitoring: MonitoringConfig,
    pub weather: OpenMeteoConfig,
    pub location: Location,
    pub room: RoomDefaults,
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    pub history: HistoryMode,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(
            defaults()?
                .add_source(File::with_name("config.toml").required(false))
                .add_source(Environment::with_prefix("HVAC").separator("__")),
        )
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("http_server.host", "127.0.0.1")?
        .set_default("http_server.port", 8080)?
        .set_default("monitoring.service_name", "smart-hvac")?
        .set_default("monitoring.logs.default_level", "info")?
        .set_default("monitoring.logs.filters", vec!["smart_hvac=debug"])?
        .set_default("monitoring.traces.default_level", "info")?
        .set_default("monitoring.traces.filters", Vec::<String>::new())?
        .set_default("weather.url", "https://api.open-meteo.com/v1/forecast")?
        .set_default("weather.cache_ttl_secs", 3600)?
        .set_default("weather.retries", 5)?
        .set_default("weather.backoff_factor_ms", 200)?
        .set_default("weather.max_backoff_secs", 120)?
        .set_default("location.city", "Jalgaon")?
        .set_default("location.latitude", 21.0029)?
        .set_default("location.longitude", 75.566)?
        .set_default("room.setpoint", 25.0)?
        .set_default("room.current_temperature", 25.0)?
        .set_default("room.occupants", 1)?
        .set_default("room.floor_area", 1000.0)?
        .set_default("room.ac_efficiency", 0.5)?
        .set_default("chart.history", "accumulate")
}
