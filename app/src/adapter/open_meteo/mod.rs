mod dto;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use infrastructure::HttpClientConfig;
use moka::future::Cache;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;

use crate::core::resilience::RetryPolicy;
use crate::core::unit::DegreeCelsius;
use crate::hvac::Location;
use crate::port::OutdoorTemperatureAccess;

use dto::{ApiErrorResponse, ForecastResponse, HourlyForecast};

#[derive(Debug, Clone, Deserialize)]
pub struct OpenMeteoConfig {
    pub url: String,
    pub cache_ttl_secs: u64,
    pub retries: u32,
    pub backoff_factor_ms: u64,
    pub max_backoff_secs: u64,
}

impl OpenMeteoConfig {
    pub fn new_client(&self, http: &HttpClientConfig) -> anyhow::Result<OpenMeteoClient> {
        let client = http.new_tracing_client()?;

        Ok(OpenMeteoClient {
            client,
            url: self.url.clone(),
            cache: Cache::builder()
                .time_to_live(Duration::from_secs(self.cache_ttl_secs))
                .max_capacity(64)
                .build(),
            retry: RetryPolicy::new(
                self.retries,
                Duration::from_millis(self.backoff_factor_ms),
                Duration::from_secs(self.max_backoff_secs),
            ),
        })
    }
}

const RETRYABLE_STATUS: [StatusCode; 3] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::GATEWAY_TIMEOUT,
];

#[derive(Clone)]
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    url: String,
    cache: Cache<String, Arc<HourlyForecast>>,
    retry: RetryPolicy,
}

enum FetchError {
    Retryable(anyhow::Error),
    Permanent(anyhow::Error),
}

impl FetchError {
    fn into_inner(self) -> anyhow::Error {
        match self {
            FetchError::Retryable(e) | FetchError::Permanent(e) => e,
        }
    }
}

impl OpenMeteoClient {
    async fn hourly_forecast(&self, location: &Location) -> anyhow::Result<Arc<HourlyForecast>> {
        let key = format!("{},{}", location.latitude, location.longitude);

        self.cache
            .try_get_with(key, async {
                tracing::debug!("No cached forecast for {}, requesting weather service", location.city);
                self.fetch_with_retry(location).await.map(Arc::new)
            })
            .await
            .map_err(|e| anyhow::anyhow!("{:#}", e))
    }

    async fn fetch_with_retry(&self, location: &Location) -> anyhow::Result<HourlyForecast> {
        let mut backoff = self.retry.backoff();

        loop {
            match self.fetch(location).await {
                Ok(forecast) => return Ok(forecast),
                Err(FetchError::Retryable(e)) if backoff.attempts() < self.retry.max_retries() => {
                    let delay = backoff.next_delay();
                    tracing::warn!(
                        "Forecast request failed (attempt {}), retrying in {:?}: {:#}",
                        backoff.attempts() + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    backoff.bump();
                }
                Err(e) => return Err(e.into_inner()),
            }
        }
    }

    async fn fetch(&self, location: &Location) -> Result<HourlyForecast, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("hourly", "temperature_2m".to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Retryable(anyhow::Error::from(e).context("Error sending forecast request")))?;

        let status = response.status();
        if RETRYABLE_STATUS.contains(&status) {
            return Err(FetchError::Retryable(anyhow::anyhow!(
                "Weather service responded with {}",
                status
            )));
        }

        if !status.is_success() {
            let reason = match response.json::<ApiErrorResponse>().await {
                Ok(body) => body.reason,
                Err(_) => status.to_string(),
            };
            return Err(FetchError::Permanent(anyhow::anyhow!(
                "Weather service rejected request ({}): {}",
                status,
                reason
            )));
        }

        let body = response
            .json::<ForecastResponse>()
            .await
            .context("Error parsing forecast response")
            .map_err(FetchError::Permanent)?;

        HourlyForecast::try_from(body).map_err(FetchError::Permanent)
    }
}

impl OutdoorTemperatureAccess for OpenMeteoClient {
    async fn current_temperature(&self, location: &Location) -> anyhow::Result<DegreeCelsius> {
        let forecast = self.hourly_forecast(location).await?;
        let (time, temperature) = forecast.latest()?;

        tracing::info!("Outdoor temperature in {} at {}: {}", location.city, time, temperature);

        Ok(temperature)
    }
}
