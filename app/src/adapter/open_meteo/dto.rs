use anyhow::{Context as _, bail};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::core::unit::DegreeCelsius;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: HourlyDto,
}

#[derive(Debug, Deserialize)]
pub struct HourlyDto {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyReading {
    pub time: NaiveDateTime,
    pub temperature: Option<DegreeCelsius>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecast {
    readings: Vec<HourlyReading>,
}

impl HourlyForecast {
    pub fn latest(&self) -> anyhow::Result<(NaiveDateTime, DegreeCelsius)> {
        let last = self.readings.last().context("Forecast contains no hourly readings")?;
        match last.temperature {
            Some(temperature) => Ok((last.time, temperature)),
            None => bail!("Forecast has no temperature for {}", last.time),
        }
    }
}

impl TryFrom<ForecastResponse> for HourlyForecast {
    type Error = anyhow::Error;

    fn try_from(value: ForecastResponse) -> Result<Self, Self::Error> {
        let hourly = value.hourly;
        if hourly.time.len() != hourly.temperature_2m.len() {
            bail!(
                "Forecast series length mismatch: {} timestamps, {} temperatures",
                hourly.time.len(),
                hourly.temperature_2m.len()
            );
        }

        let readings = hourly
            .time
            .iter()
            .zip(hourly.temperature_2m)
            .map(|(time, temperature)| {
                let time = NaiveDateTime::parse_from_str(time, TIME_FORMAT)
                    .with_context(|| format!("Invalid forecast timestamp {time}"))?;
                Ok(HourlyReading {
                    time,
                    temperature: temperature.map(DegreeCelsius),
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { readings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> anyhow::Result<HourlyForecast> {
        let response: ForecastResponse = serde_json::from_value(json)?;
        response.try_into()
    }

    #[test]
    fn latest_is_last_hourly_value() {
        let forecast = parse(serde_json::json!({
            "latitude": 21.0,
            "longitude": 75.5,
            "hourly_units": { "time": "iso8601", "temperature_2m": "°C" },
            "hourly": {
                "time": ["2026-10-17T00:00", "2026-10-17T01:00", "2026-10-17T23:00"],
                "temperature_2m": [24.1, 23.8, 26.4]
            }
        }))
        .unwrap();

        let (time, temperature) = forecast.latest().unwrap();
        assert_eq!(time.to_string(), "2026-10-17 23:00:00");
        assert_eq!(temperature, DegreeCelsius(26.4));
    }

    #[test]
    fn missing_last_value_is_an_error() {
        let forecast = parse(serde_json::json!({
            "hourly": {
                "time": ["2026-10-17T00:00", "2026-10-17T01:00"],
                "temperature_2m": [24.1, null]
            }
        }))
        .unwrap();

        assert!(forecast.latest().is_err());
    }

    #[test]
    fn empty_series_is_an_error() {
        let forecast = parse(serde_json::json!({ "hourly": { "time": [], "temperature_2m": [] } })).unwrap();

        assert!(forecast.latest().is_err());
    }

    #[test]
    fn rejects_mismatched_series() {
        let result = parse(serde_json::json!({
            "hourly": { "time": ["2026-10-17T00:00"], "temperature_2m": [1.0, 2.0] }
        }));

        assert!(result.is_err());
    }

    #[test]
    fn rejects_invalid_timestamp() {
        let result = parse(serde_json::json!({
            "hourly": { "time": ["yesterday"], "temperature_2m": [1.0] }
        }));

        assert!(result.is_err());
    }
}
