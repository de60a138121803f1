use serde::{Deserialize, Serialize};

/// A synthetic weather reading for a city.
///
/// Readings are generated on every request and never stored, so two calls
/// for the same city are unrelated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    /// Degrees Celsius.
    pub temperature: i32,
    pub condition: String,
    /// Relative humidity in percent.
    pub humidity: u32,
    /// km/h
    pub wind_speed: u32,
    pub city: String,
    pub icon: String,
}
