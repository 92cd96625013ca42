pub mod open_meteo;
pub mod web;
