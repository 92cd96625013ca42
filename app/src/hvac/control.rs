use anyhow::Context as _;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::unit::DegreeCelsius;
use crate::port::OutdoorTemperatureAccess;

use super::chart::{HistoryMode, SyntheticRun, TemperatureHistory};
use super::form::{Location, RoomForm, RoomInput};
use super::setpoint::calculate_setpoint;

pub struct SmartHvac<S> {
    location: Location,
    form: RoomForm,
    history: TemperatureHistory,
    history_mode: HistoryMode,
    source: S,
    rng: StdRng,
}

impl<S> SmartHvac<S>
where
    S: OutdoorTemperatureAccess,
{
    pub fn new(location: Location, form: RoomForm, history_mode: HistoryMode, source: S) -> Self {
        Self::with_rng(location, form, history_mode, source, StdRng::from_entropy())
    }

    pub fn with_rng(location: Location, form: RoomForm, history_mode: HistoryMode, source: S, rng: StdRng) -> Self {
        Self {
            location,
            form,
            history: TemperatureHistory::default(),
            history_mode,
            source,
            rng,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn form(&self) -> &RoomForm {
        &self.form
    }

    pub fn history(&self) -> &TemperatureHistory {
        &self.history
    }

    pub fn update_form(&mut self, input: RoomInput) {
        self.form.apply(input);
    }

    /// Fetches the outdoor temperature, derives the new setpoint from it and
    /// appends a synthetic run to the chart. Nothing is touched when the
    /// fetch fails.
    #[tracing::instrument(skip(self), fields(city = %self.location.city, setpoint = tracing::field::Empty))]
    pub async fn smart_control(&mut self) -> anyhow::Result<DegreeCelsius> {
        let current = self
            .source
            .current_temperature(&self.location)
            .await
            .context("Error getting current temperature")?;

        self.form.record_current_temperature(current);

        let setpoint = calculate_setpoint(
            current,
            self.form.floor_area(),
            self.form.occupants(),
            self.form.ac_efficiency(),
        );
        self.form.record_setpoint(setpoint);
        tracing::Span::current().record("setpoint", setpoint.0);

        if self.history_mode == HistoryMode::ResetPerAction {
            self.history.clear();
        }
        self.history.append(SyntheticRun::generate(setpoint, &mut self.rng));

        tracing::info!(
            "Current temperature {}, new setpoint {} for {} and {} occupants ({} chart samples)",
            current,
            setpoint,
            self.form.floor_area(),
            self.form.occupants(),
            self.history.len()
        );

        Ok(setpoint)
    }
}

#[cfg(test)]
pub mod test_support {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays queued readings, failing once the queue is exhausted.
    #[derive(Default)]
    pub struct ScriptedSource {
        readings: Mutex<VecDeque<anyhow::Result<DegreeCelsius>>>,
    }

    impl ScriptedSource {
        pub fn new(readings: Vec<anyhow::Result<DegreeCelsius>>) -> Self {
            Self {
                readings: Mutex::new(readings.into()),
            }
        }
    }

    impl OutdoorTemperatureAccess for ScriptedSource {
        async fn current_temperature(&self, _location: &Location) -> anyhow::Result<DegreeCelsius> {
            self.readings
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow::anyhow!("weather service unavailable")))
        }
    }

    pub fn hvac_with(readings: Vec<anyhow::Result<DegreeCelsius>>, mode: HistoryMode) -> SmartHvac<ScriptedSource> {
        SmartHvac::with_rng(
            crate::hvac::form::test_support::jalgaon(),
            crate::hvac::form::test_support::default_form(),
            mode,
            ScriptedSource::new(readings),
            StdRng::seed_from_u64(7),
        )
    }
}
