use serde::{Deserialize, Serialize};

/// Sentinel returned when the provider has no usable weather data.
pub const EMPTY_RESULT: WeatherInfo = WeatherInfo {
    temperature: 0.0,
    description: String::new(),
    found: false,
};

/// Normalized weather record handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInfo {
    /// Degrees Celsius, floored to a whole degree then offset by half a degree.
    pub temperature: f64,
    pub description: String,
    pub found: bool,
}

impl WeatherInfo {
    pub fn empty() -> Self {
        EMPTY_RESULT
    }

    pub fn is_empty(&self) -> bool {
        *self == EMPTY_RESULT
    }
}

impl Default for WeatherInfo {
    fn default() -> Self {
        EMPTY_RESULT
    }
}
