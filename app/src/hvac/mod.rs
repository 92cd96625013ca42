pub mod chart;
pub mod control;
pub mod form;
pub mod setpoint;

pub use chart::{ChartView, HistoryMode, TemperatureHistory};
pub use control::SmartHvac;
pub use form::{Location, RoomDefaults, RoomForm, RoomInput};
