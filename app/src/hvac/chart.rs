use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::core::unit::DegreeCelsius;

pub const SAMPLES_PER_RUN: usize = 100;
pub const TIME_STEP: f64 = 0.1;

const ROOM_TEMPERATURE_STD_DEV: f64 = 1.0;
const Y_AXIS_MARGIN: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    #[default]
    Accumulate,
    ResetPerAction,
}

/// One synthetic room temperature curve around a setpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticRun {
    pub time: Vec<f64>,
    pub room_temps: Vec<f64>,
    pub setpoint_temps: Vec<f64>,
}

impl SyntheticRun {
    pub fn generate<R: Rng>(setpoint: DegreeCelsius, rng: &mut R) -> Self {
        let time: Vec<f64> = (0..SAMPLES_PER_RUN).map(|i| i as f64 * TIME_STEP).collect();

        let room_temps = (0..SAMPLES_PER_RUN)
            .map(|_| {
                let z: f64 = rng.sample(StandardNormal);
                setpoint.0 + ROOM_TEMPERATURE_STD_DEV * z
            })
            .collect();

        Self {
            time,
            room_temps,
            setpoint_temps: vec![setpoint.0; SAMPLES_PER_RUN],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartView {
    pub x: AxisRange,
    pub y: AxisRange,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureHistory {
    time: Vec<f64>,
    room_temps: Vec<f64>,
    setpoint_temps: Vec<f64>,
}

impl TemperatureHistory {
    pub fn append(&mut self, run: SyntheticRun) {
        self.time.extend(run.time);
        self.room_temps.extend(run.room_temps);
        self.setpoint_temps.extend(run.setpoint_temps);
    }

    pub fn clear(&mut self) {
        self.time.clear();
        self.room_temps.clear();
        self.setpoint_temps.clear();
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    #[cfg(test)]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    #[cfg(test)]
    pub fn room_temps(&self) -> &[f64] {
        &self.room_temps
    }

    #[cfg(test)]
    pub fn setpoint_temps(&self) -> &[f64] {
        &self.setpoint_temps
    }

    pub fn room_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.room_temps.iter().copied())
    }

    pub fn setpoint_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.setpoint_temps.iter().copied())
    }

    /// Axis limits covering all recorded data, `None` until the first run was appended.
    pub fn view(&self) -> Option<ChartView> {
        let max_time = self.time.iter().copied().reduce(f64::max)?;
        let min_room = self.room_temps.iter().copied().reduce(f64::min)?;
        let max_room = self.room_temps.iter().copied().reduce(f64::max)?;

        Some(ChartView {
            x: AxisRange { min: 0.0, max: max_time },
            y: AxisRange {
                min: min_room - Y_AXIS_MARGIN,
                max: max_room + Y_AXIS_MARGIN,
            },
        })
    }
}
