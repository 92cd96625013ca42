use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub const SQUARE_FEET_PER_SQUARE_METER: f64 = 10.764;

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareFeet(pub f64);

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct SquareMeters(pub f64);

impl From<SquareFeet> for SquareMeters {
    fn from(value: SquareFeet) -> Self {
        SquareMeters(value.0 / SQUARE_FEET_PER_SQUARE_METER)
    }
}

impl Display for SquareFeet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} sqft", self.0)
    }
}
