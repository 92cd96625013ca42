use crate::core::unit::{DegreeCelsius, SquareFeet, SquareMeters};

const OFFSET_PER_CAPACITY_UNIT: f64 = 0.1;

/// Cooling capacity demand of a room: floor area in m² times occupants times AC efficiency.
pub fn ac_capacity(floor_area: SquareFeet, occupants: u32, ac_efficiency: f64) -> f64 {
    let room_area = SquareMeters::from(floor_area);
    room_area.0 * occupants as f64 * ac_efficiency
}

/// New setpoint derived from the current temperature. Unclamped: large rooms
/// with many occupants can yield arbitrarily low values.
pub fn calculate_setpoint(
    current: DegreeCelsius,
    floor_area: SquareFeet,
    occupants: u32,
    ac_efficiency: f64,
) -> DegreeCelsius {
    let capacity = ac_capacity(floor_area, occupants, ac_efficiency);
    current - DegreeCelsius(capacity) * OFFSET_PER_CAPACITY_UNIT
}
