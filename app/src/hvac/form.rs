use serde::{Deserialize, Serialize};

use crate::core::unit::{DegreeCelsius, SquareFeet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Values the user may edit on the form. The current temperature is not among
/// them: it only ever comes from the weather service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoomInput {
    pub setpoint: DegreeCelsius,
    pub occupants: u32,
    pub floor_area: SquareFeet,
    pub ac_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoomDefaults {
    pub setpoint: DegreeCelsius,
    pub current_temperature: DegreeCelsius,
    pub occupants: u32,
    pub floor_area: SquareFeet,
    pub ac_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomForm {
    setpoint: DegreeCelsius,
    current_temperature: DegreeCelsius,
    occupants: u32,
    floor_area: SquareFeet,
    ac_efficiency: f64,
}

impl From<RoomDefaults> for RoomForm {
    fn from(value: RoomDefaults) -> Self {
        Self {
            setpoint: value.setpoint,
            current_temperature: value.current_temperature,
            occupants: value.occupants,
            floor_area: value.floor_area,
            ac_efficiency: value.ac_efficiency,
        }
    }
}

impl RoomForm {
    pub fn setpoint(&self) -> DegreeCelsius {
        self.setpoint
    }

    pub fn current_temperature(&self) -> DegreeCelsius {
        self.current_temperature
    }

    pub fn occupants(&self) -> u32 {
        self.occupants
    }

    pub fn floor_area(&self) -> SquareFeet {
        self.floor_area
    }

    pub fn ac_efficiency(&self) -> f64 {
        self.ac_efficiency
    }

    pub fn apply(&mut self, input: RoomInput) {
        self.setpoint = input.setpoint;
        self.occupants = input.occupants;
        self.floor_area = input.floor_area;
        self.ac_efficiency = input.ac_efficiency;
    }

    pub(super) fn record_current_temperature(&mut self, value: DegreeCelsius) {
        self.current_temperature = value;
    }

    pub(super) fn record_setpoint(&mut self, value: DegreeCelsius) {
        self.setpoint = value;
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::core::unit::v;

    pub fn jalgaon() -> Location {
        Location {
            city: "Jalgaon".to_string(),
            latitude: 21.0029,
            longitude: 75.566,
        }
    }

    pub fn default_form() -> RoomForm {
        RoomDefaults {
            setpoint: v!(25 C),
            current_temperature: v!(25 C),
            occupants: 1,
            floor_area: v!(1000 sqft),
            ac_efficiency: 0.5,
        }
        .into()
    }
}
