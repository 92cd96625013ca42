#![allow(async_fn_in_trait)]

use anyhow::Result;

use crate::core::unit::DegreeCelsius;
use crate::hvac::Location;

pub trait OutdoorTemperatureAccess {
    async fn current_temperature(&self, location: &Location) -> Result<DegreeCelsius>;
}
